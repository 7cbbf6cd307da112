//! Booking state-machine operations.
//!
//! Every operation validates first, then applies its changes to a clone and
//! returns it. On error the caller still holds the untouched original, so a
//! transition either commits completely (status, audit entry, derived fields)
//! or not at all.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use skillmart_types::booking::{
    Actor, BookingMessage, BookingStatus, Cancellation, Deliverable, Dispute, DisputeOutcome,
    DisputeStatus, MessageKind, NewDeliverable, PaymentStatus, RevisionRequest,
    RevisionRequestStatus, TransitionRecord,
};
use skillmart_types::config::FeePolicy;
use skillmart_types::error::BookingError;

use super::{Booking, fees, policy};

impl Booking {
    /// Move to `to`, recording an audit message.
    ///
    /// Fails with `IllegalTransition` unless `to` is a declared successor of
    /// the current status. `cancelled`, `disputed` and `revision` carry
    /// metadata and must be entered through `cancel`, `dispute` and
    /// `request_revision`; a `disputed` booking only leaves through
    /// `resolve_dispute`.
    pub fn transition(
        &self,
        to: BookingStatus,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        self.check_transition(to)?;
        if policy::requires_dedicated_operation(to) {
            return Err(BookingError::Validation(format!(
                "'{to}' must be entered through its dedicated operation"
            )));
        }
        if policy::settled_by_resolution(self.status) {
            return Err(BookingError::Validation(format!(
                "a '{}' booking must be settled through dispute resolution",
                self.status
            )));
        }
        let mut next = self.clone();
        next.enter(to, actor, now);
        Ok(next)
    }

    /// Cancel before work starts (pending, accepted or paid).
    pub fn cancel(
        &self,
        reason: &str,
        cancelled_by: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let reason = required_text(reason, "cancellation reason")?;
        self.check_transition(BookingStatus::Cancelled)?;

        let mut next = self.clone();
        next.cancellation = Some(Cancellation {
            reason,
            cancelled_by: cancelled_by.clone(),
            cancelled_at: now,
            was_paid: self.payment_status == PaymentStatus::Escrowed,
        });
        next.enter(BookingStatus::Cancelled, cancelled_by, now);
        Ok(next)
    }

    /// Open a dispute while work is in flight (in-progress, delivered, revision).
    pub fn dispute(
        &self,
        reason: &str,
        raised_by: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let reason = required_text(reason, "dispute reason")?;
        self.check_transition(BookingStatus::Disputed)?;

        let mut next = self.clone();
        next.dispute = Some(Dispute {
            reason,
            raised_by: raised_by.clone(),
            status: DisputeStatus::Open,
            opened_at: now,
            outcome: None,
            resolved_at: None,
        });
        next.enter(BookingStatus::Disputed, raised_by, now);
        Ok(next)
    }

    /// Settle an open dispute: `release` completes the booking, `refund`
    /// refunds it.
    pub fn resolve_dispute(
        &self,
        outcome: DisputeOutcome,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let to = match outcome {
            DisputeOutcome::Release => BookingStatus::Completed,
            DisputeOutcome::Refund => BookingStatus::Refunded,
        };
        if self.status != BookingStatus::Disputed {
            return Err(BookingError::IllegalTransition {
                from: self.status,
                to,
            });
        }
        self.check_transition(to)?;

        let mut next = self.clone();
        if let Some(dispute) = next.dispute.as_mut() {
            dispute.status = DisputeStatus::Resolved;
            dispute.outcome = Some(outcome);
            dispute.resolved_at = Some(now);
        }
        next.enter(to, actor, now);
        Ok(next)
    }

    /// Ask for a rework cycle after delivery, or another one while a
    /// revision is already under way.
    ///
    /// Fails with `RevisionLimitExceeded` once `revisions_used` reaches
    /// `max_revisions`, whatever the current status.
    pub fn request_revision(
        &self,
        details: &str,
        requested_by: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let details = required_text(details, "revision details")?;
        if self.revisions_used >= self.max_revisions {
            return Err(BookingError::RevisionLimitExceeded {
                used: self.revisions_used,
                max: self.max_revisions,
            });
        }
        if !policy::accepts_revision_requests(self.status) {
            return Err(BookingError::IllegalTransition {
                from: self.status,
                to: BookingStatus::Revision,
            });
        }

        let mut next = self.clone();
        next.revisions_used += 1;
        next.revision_requests.append(RevisionRequest {
            id: Uuid::now_v7(),
            details,
            requested_by: requested_by.clone(),
            status: RevisionRequestStatus::Pending,
            sequence: next.revisions_used,
            requested_at: now,
        });
        if self.status == BookingStatus::Revision {
            next.append_system_message(
                requested_by,
                format!(
                    "Revision {} of {} requested by {requested_by}",
                    next.revisions_used, next.max_revisions
                ),
                None,
                now,
            );
            next.updated_at = now;
        } else {
            next.enter(BookingStatus::Revision, requested_by, now);
        }
        Ok(next)
    }

    /// Attach a deliverable while work is active.
    pub fn add_deliverable(
        &self,
        deliverable: NewDeliverable,
        submitted_by: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let title = required_text(&deliverable.title, "deliverable title")?;
        if !policy::accepts_deliverables(self.status) {
            return Err(BookingError::Validation(format!(
                "deliverables cannot be added while the booking is '{}'",
                self.status
            )));
        }

        let mut next = self.clone();
        next.deliverables.append(Deliverable {
            id: Uuid::now_v7(),
            title,
            url: deliverable.url.filter(|u| !u.trim().is_empty()),
            note: deliverable.note.trim().to_string(),
            submitted_by: submitted_by.clone(),
            submitted_at: now,
        });
        next.updated_at = now;
        Ok(next)
    }

    /// Append a participant message. Allowed in every status.
    pub fn add_message(
        &self,
        body: &str,
        author: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let body = required_text(body, "message body")?;

        let mut next = self.clone();
        next.messages.append(BookingMessage {
            id: Uuid::now_v7(),
            kind: MessageKind::User,
            author: author.clone(),
            body,
            transition: None,
            created_at: now,
        });
        next.updated_at = now;
        Ok(next)
    }

    /// Change the agreed price before payment and recompute the fee split.
    pub fn renegotiate_price(
        &self,
        new_price: Decimal,
        actor: &Actor,
        fee_policy: &FeePolicy,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        fees::validate_price(new_price)?;
        if self.fees_frozen() {
            return Err(BookingError::Validation(format!(
                "price is frozen once a booking is '{}'",
                self.status
            )));
        }

        let mut next = self.clone();
        next.agreed_price = new_price;
        next.fees = fees::platform_fee(new_price, fee_policy);
        next.append_system_message(
            actor,
            format!(
                "Agreed price changed from {} to {} {} by {actor}",
                self.agreed_price, new_price, self.currency
            ),
            None,
            now,
        );
        next.updated_at = now;
        Ok(next)
    }

    /// Record a failed payment attempt on an accepted booking. The booking
    /// stays `accepted` and may still move to `paid` on a later attempt.
    pub fn record_payment_failure(
        &self,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        if self.status != BookingStatus::Accepted {
            return Err(BookingError::Validation(format!(
                "payment failures can only be recorded on accepted bookings, not '{}'",
                self.status
            )));
        }

        let mut next = self.clone();
        next.payment_status = PaymentStatus::Failed;
        next.append_system_message(actor, format!("Payment attempt failed ({actor})"), None, now);
        next.updated_at = now;
        Ok(next)
    }

    fn check_transition(&self, to: BookingStatus) -> Result<(), BookingError> {
        let allowed = policy::can_transition(self.status, to)
            && (to != BookingStatus::Refunded
                || self.status != BookingStatus::Cancelled
                || self.cancellation.as_ref().is_some_and(|c| c.was_paid));
        if allowed {
            Ok(())
        } else {
            Err(BookingError::IllegalTransition {
                from: self.status,
                to,
            })
        }
    }

    /// Apply a checked transition and its side effects. Only called on a clone.
    fn enter(&mut self, to: BookingStatus, actor: &Actor, now: DateTime<Utc>) {
        let from = self.status;
        self.status = to;

        match to {
            BookingStatus::Paid => self.payment_status = PaymentStatus::Escrowed,
            BookingStatus::InProgress => {
                self.start_date.get_or_insert(now);
            }
            BookingStatus::Delivered => {
                self.actual_delivery.get_or_insert(now);
            }
            BookingStatus::Completed => self.payment_status = PaymentStatus::Released,
            BookingStatus::Refunded => self.payment_status = PaymentStatus::Refunded,
            _ => {}
        }

        self.append_system_message(
            actor,
            format!("Status changed from {from} to {to} by {actor}"),
            Some(TransitionRecord { from, to }),
            now,
        );
        self.updated_at = now;
    }

    fn append_system_message(
        &mut self,
        actor: &Actor,
        body: String,
        transition: Option<TransitionRecord>,
        now: DateTime<Utc>,
    ) {
        self.messages.append(BookingMessage {
            id: Uuid::now_v7(),
            kind: MessageKind::System,
            author: actor.clone(),
            body,
            transition,
            created_at: now,
        });
    }
}

fn required_text(value: &str, what: &str) -> Result<String, BookingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookingError::Validation(format!("{what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
