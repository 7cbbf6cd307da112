//! Booking status enums, actors, and audit-log entry types.
//!
//! The `Booking` aggregate itself (and the state machine that mutates it) lives
//! in skillmart-core. These are the plain values it is built from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::ids::{ClientId, PackageId, SellerId};

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a booking.
///
/// Happy path: pending -> accepted -> paid -> in-progress -> delivered -> completed.
/// Branches: revision, cancelled, disputed, refunded. The legal successors of
/// each status are defined in one table in `skillmart_core::booking::policy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Paid,
    InProgress,
    Delivered,
    Revision,
    Completed,
    Cancelled,
    Disputed,
    Refunded,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 10] = [
        BookingStatus::Pending,
        BookingStatus::Accepted,
        BookingStatus::Paid,
        BookingStatus::InProgress,
        BookingStatus::Delivered,
        BookingStatus::Revision,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Disputed,
        BookingStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Paid => "paid",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Delivered => "delivered",
            BookingStatus::Revision => "revision",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Disputed => "disputed",
            BookingStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("invalid booking status: '{s}'"))
    }
}

/// Escrow-style payment status. No money moves; this only mirrors the lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Escrowed,
    Released,
    Refunded,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Escrowed => write!(f, "escrowed"),
            PaymentStatus::Released => write!(f, "released"),
            PaymentStatus::Refunded => write!(f, "refunded"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// Who performed an operation on a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "lowercase")]
pub enum Actor {
    Client(ClientId),
    Seller(SellerId),
    Admin(String),
    System,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Client(id) => write!(f, "client:{id}"),
            Actor::Seller(id) => write!(f, "seller:{id}"),
            Actor::Admin(id) => write!(f, "admin:{id}"),
            Actor::System => write!(f, "system"),
        }
    }
}

/// Parses `client:<id>`, `seller:<id>`, `admin:<id>` or `system`.
impl FromStr for Actor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("system") {
            return Ok(Actor::System);
        }
        let (role, id) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid actor '{s}': expected <role>:<id>"))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(format!("invalid actor '{s}': empty id"));
        }
        match role.to_lowercase().as_str() {
            "client" => Ok(Actor::Client(ClientId::new(id))),
            "seller" => Ok(Actor::Seller(SellerId::new(id))),
            "admin" => Ok(Actor::Admin(id.to_string())),
            other => Err(format!("invalid actor role: '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Append-only log
// ---------------------------------------------------------------------------

/// Ordered, append-only sequence.
///
/// There is no way to remove or replace an entry once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppendLog<T>(Vec<T>);

impl<T> AppendLog<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn append(&mut self, entry: T) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Default for AppendLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a AppendLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Log entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Written by a participant.
    User,
    /// Written by the state machine on every accepted transition.
    System,
}

/// One entry in a booking's message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingMessage {
    pub id: Uuid,
    pub kind: MessageKind,
    pub author: Actor,
    pub body: String,
    /// Set on system messages produced by a status transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionRecord>,
    pub created_at: DateTime<Utc>,
}

/// Structured old -> new record carried by system messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

/// A delivered artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub note: String,
    pub submitted_by: Actor,
    pub submitted_at: DateTime<Utc>,
}

/// Input for `add_deliverable`; the state machine stamps id and timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDeliverable {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionRequestStatus {
    Pending,
}

/// A client-requested rework cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionRequest {
    pub id: Uuid,
    pub details: String,
    pub requested_by: Actor,
    pub status: RevisionRequestStatus,
    /// 1-based position within the booking's revision budget.
    pub sequence: u32,
    pub requested_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Cancellation, dispute, fees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cancellation {
    pub reason: String,
    pub cancelled_by: Actor,
    pub cancelled_at: DateTime<Utc>,
    /// Whether funds were escrowed when the booking was cancelled. Only a
    /// paid cancellation can move on to `refunded`.
    pub was_paid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisputeStatus {
    Open,
    Resolved,
}

/// How an admin settled a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisputeOutcome {
    /// Funds go to the seller; booking completes.
    Release,
    /// Funds go back to the client; booking is refunded.
    Refund,
}

impl FromStr for DisputeOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" => Ok(DisputeOutcome::Release),
            "refund" => Ok(DisputeOutcome::Refund),
            other => Err(format!("invalid dispute outcome: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispute {
    pub reason: String,
    pub raised_by: Actor,
    pub status: DisputeStatus,
    pub opened_at: DateTime<Utc>,
    #[serde(default)]
    pub outcome: Option<DisputeOutcome>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Platform fee split of an agreed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub platform_fee: Decimal,
    pub seller_earning: Decimal,
}

/// Request to book a seller's package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub client_id: ClientId,
    pub seller_id: SellerId,
    pub package_id: PackageId,
    /// Defaults to the configured marketplace currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Initial brief from the client, recorded as the first message.
    #[serde(default)]
    pub requirements: Option<String>,
}
