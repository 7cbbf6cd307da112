//! Booking aggregate and its state machine.
//!
//! A `Booking` governs one client-seller engagement. Its status, payment
//! status, revision accounting, fee split and audit logs are private and only
//! change through the operations in [`machine`], each of which returns a new
//! `Booking` and leaves the original untouched when it fails.

pub mod fees;
pub mod machine;
pub mod policy;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skillmart_types::booking::{
    Actor, AppendLog, BookingMessage, BookingStatus, Cancellation, Deliverable, Dispute,
    FeeBreakdown, MessageKind, PaymentStatus, RevisionRequest,
};
use skillmart_types::config::FeePolicy;
use skillmart_types::error::BookingError;
use skillmart_types::ids::{BookingId, ClientId, PackageId, SellerId};

/// Everything needed to open a booking, snapshotted from the seller's package.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub id: BookingId,
    pub client_id: ClientId,
    pub seller_id: SellerId,
    pub service_id: PackageId,
    pub agreed_price: Decimal,
    pub currency: String,
    pub max_revisions: u32,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub requirements: Option<String>,
}

/// One client-seller engagement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    client_id: ClientId,
    seller_id: SellerId,
    service_id: PackageId,
    agreed_price: Decimal,
    currency: String,
    status: BookingStatus,
    payment_status: PaymentStatus,
    revisions_used: u32,
    max_revisions: u32,
    fees: FeeBreakdown,
    messages: AppendLog<BookingMessage>,
    deliverables: AppendLog<Deliverable>,
    revision_requests: AppendLog<RevisionRequest>,
    cancellation: Option<Cancellation>,
    dispute: Option<Dispute>,
    start_date: Option<DateTime<Utc>>,
    actual_delivery: Option<DateTime<Utc>>,
    expected_delivery: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Optimistic-concurrency token. 0 until first persisted.
    version: u64,
}

impl Booking {
    /// Open a booking in `pending` status with fees computed from `fee_policy`.
    pub fn open(
        new: NewBooking,
        fee_policy: &FeePolicy,
        now: DateTime<Utc>,
    ) -> Result<Self, BookingError> {
        if new.id.is_blank() {
            return Err(BookingError::Validation("booking id cannot be empty".to_string()));
        }
        if new.client_id.is_blank() || new.seller_id.is_blank() {
            return Err(BookingError::Validation(
                "client and seller ids are required".to_string(),
            ));
        }
        if new.client_id.as_str() == new.seller_id.as_str() {
            return Err(BookingError::Validation(
                "a seller cannot book their own service".to_string(),
            ));
        }
        fees::validate_price(new.agreed_price)?;
        let currency = normalize_currency(&new.currency)?;

        let mut booking = Self {
            id: new.id,
            client_id: new.client_id.clone(),
            seller_id: new.seller_id,
            service_id: new.service_id,
            agreed_price: new.agreed_price,
            currency,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            revisions_used: 0,
            max_revisions: new.max_revisions,
            fees: fees::platform_fee(new.agreed_price, fee_policy),
            messages: AppendLog::new(),
            deliverables: AppendLog::new(),
            revision_requests: AppendLog::new(),
            cancellation: None,
            dispute: None,
            start_date: None,
            actual_delivery: None,
            expected_delivery: new.expected_delivery,
            created_at: now,
            updated_at: now,
            version: 0,
        };

        if let Some(brief) = new.requirements.filter(|r| !r.trim().is_empty()) {
            booking.messages.append(BookingMessage {
                id: Uuid::now_v7(),
                kind: MessageKind::User,
                author: Actor::Client(new.client_id),
                body: brief.trim().to_string(),
                transition: None,
                created_at: now,
            });
        }

        Ok(booking)
    }

    /// Mark this value as written by a repository. Called by repository
    /// implementations after a successful save; bumps the version token.
    pub fn into_committed(mut self) -> Self {
        self.version += 1;
        self
    }

    /// Work is in flight and the expected delivery date has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        policy::work_in_flight(self.status)
            && self.expected_delivery.is_some_and(|due| due < now)
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    pub fn service_id(&self) -> &PackageId {
        &self.service_id
    }

    pub fn agreed_price(&self) -> Decimal {
        self.agreed_price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn revisions_used(&self) -> u32 {
        self.revisions_used
    }

    pub fn max_revisions(&self) -> u32 {
        self.max_revisions
    }

    pub fn revisions_remaining(&self) -> u32 {
        self.max_revisions.saturating_sub(self.revisions_used)
    }

    pub fn fees(&self) -> FeeBreakdown {
        self.fees
    }

    pub fn platform_fee(&self) -> Decimal {
        self.fees.platform_fee
    }

    pub fn seller_earning(&self) -> Decimal {
        self.fees.seller_earning
    }

    pub fn messages(&self) -> &AppendLog<BookingMessage> {
        &self.messages
    }

    pub fn deliverables(&self) -> &AppendLog<Deliverable> {
        &self.deliverables
    }

    pub fn revision_requests(&self) -> &AppendLog<RevisionRequest> {
        &self.revision_requests
    }

    pub fn cancellation(&self) -> Option<&Cancellation> {
        self.cancellation.as_ref()
    }

    pub fn dispute_info(&self) -> Option<&Dispute> {
        self.dispute.as_ref()
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn actual_delivery(&self) -> Option<DateTime<Utc>> {
        self.actual_delivery
    }

    pub fn expected_delivery(&self) -> Option<DateTime<Utc>> {
        self.expected_delivery
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

fn normalize_currency(raw: &str) -> Result<String, BookingError> {
    let code = raw.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(BookingError::Validation(format!(
            "invalid currency code '{raw}': expected three letters"
        )));
    }
    Ok(code)
}
