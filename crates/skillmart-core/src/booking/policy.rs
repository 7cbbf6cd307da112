//! The booking successor table.
//!
//! This is the only place that decides which status may follow which. Every
//! state-machine operation asks `can_transition` before touching a booking.

use skillmart_types::booking::BookingStatus;

use BookingStatus::*;

/// Legal next statuses for `from`. Terminal statuses return an empty slice.
///
/// `Cancelled -> Refunded` is additionally guarded: it is only legal when the
/// booking was paid at the time it was cancelled.
pub fn successors(from: BookingStatus) -> &'static [BookingStatus] {
    match from {
        Pending => &[Accepted, Cancelled],
        Accepted => &[Paid, Cancelled],
        Paid => &[InProgress, Cancelled],
        InProgress => &[Delivered, Disputed],
        Delivered => &[Completed, Revision, Disputed],
        Revision => &[InProgress, Delivered, Disputed],
        Disputed => &[Completed, Refunded],
        Cancelled => &[Refunded],
        Completed | Refunded => &[],
    }
}

pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    successors(from).contains(&to)
}

pub fn is_terminal(status: BookingStatus) -> bool {
    successors(status).is_empty()
}

/// Statuses that carry metadata and may only be entered through their
/// dedicated operation (`cancel`, `dispute`, `request_revision`).
pub fn requires_dedicated_operation(to: BookingStatus) -> bool {
    matches!(to, Cancelled | Disputed | Revision)
}

/// Statuses a dispute is settled from. Only `resolve_dispute` may leave them,
/// so the dispute record is always closed alongside the status change.
pub fn settled_by_resolution(from: BookingStatus) -> bool {
    matches!(from, Disputed)
}

/// Statuses in which a client may request a revision. From `revision` the
/// request stacks onto the open rework cycle without a status change.
pub fn accepts_revision_requests(status: BookingStatus) -> bool {
    matches!(status, Delivered | Revision)
}

/// Statuses in which a seller may attach deliverables.
pub fn accepts_deliverables(status: BookingStatus) -> bool {
    matches!(status, InProgress | Revision | Delivered)
}

/// Statuses in which the agreed price may still change.
pub fn price_negotiable(status: BookingStatus) -> bool {
    matches!(status, Pending | Accepted)
}

/// Statuses counted by the overdue query.
pub fn work_in_flight(status: BookingStatus) -> bool {
    matches!(status, InProgress | Revision)
}
