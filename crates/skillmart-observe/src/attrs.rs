//! Span attribute names shared by the CLI command spans.
//!
//! `command_span` declares every attribute up front as empty so callers can
//! fill them in with `Span::record` once the ids are known.

use tracing::Span;

/// The CLI command being executed (e.g. `booking.cancel`).
pub const COMMAND: &str = "command";

pub const BOOKING_ID: &str = "booking.id";

pub const BOOKING_STATUS: &str = "booking.status";

pub const SELLER_ID: &str = "seller.id";

pub const ACTOR: &str = "actor";

/// Root span for one CLI invocation.
pub fn command_span(command: &str) -> Span {
    tracing::info_span!(
        "smart.command",
        command = command,
        booking.id = tracing::field::Empty,
        booking.status = tracing::field::Empty,
        seller.id = tracing::field::Empty,
        actor = tracing::field::Empty,
    )
}
