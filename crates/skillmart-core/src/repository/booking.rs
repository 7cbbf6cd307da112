//! Booking repository trait.

use chrono::{DateTime, Utc};

use skillmart_types::booking::BookingStatus;
use skillmart_types::error::RepositoryError;
use skillmart_types::ids::{BookingId, SellerId};

use crate::booking::Booking;

/// Persistence for bookings with optimistic concurrency.
///
/// `save` must compare-and-swap on `Booking::version`: a booking at version 0
/// is inserted, any other version only overwrites a stored row carrying the
/// same version. A mismatch is `RepositoryError::Conflict`. On success the
/// committed value (see `Booking::into_committed`) is returned.
pub trait BookingRepository: Send + Sync {
    fn load(
        &self,
        id: &BookingId,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, RepositoryError>> + Send;

    fn save(
        &self,
        booking: &Booking,
    ) -> impl std::future::Future<Output = Result<Booking, RepositoryError>> + Send;

    /// A seller's bookings, newest first, optionally filtered by status.
    fn list_by_seller(
        &self,
        seller_id: &SellerId,
        status: Option<BookingStatus>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, RepositoryError>> + Send;

    /// Bookings in `in-progress` or `revision` whose expected delivery is
    /// before `now`, oldest due date first.
    fn list_overdue(
        &self,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, RepositoryError>> + Send;
}
