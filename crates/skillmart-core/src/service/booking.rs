//! Booking service.
//!
//! Each mutating method follows the same shape: claim the booking id in the
//! in-flight guard, load, apply one state-machine operation, save. The save
//! is a compare-and-swap on the booking version, so a writer in another
//! process that got there first turns this save into a `Conflict`.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use skillmart_types::booking::{
    Actor, BookingStatus, CreateBookingRequest, DisputeOutcome, NewDeliverable,
};
use skillmart_types::config::{FeePolicy, MarketplaceConfig};
use skillmart_types::error::BookingError;
use skillmart_types::ids::{BookingId, SellerId};

use crate::booking::{Booking, NewBooking};
use crate::repository::booking::BookingRepository;
use crate::repository::profile::ProfileRepository;
use crate::service::clock::Clock;
use crate::service::guard::InFlightGuard;
use crate::service::id::BookingIdGenerator;

/// Use-case layer over the booking state machine.
///
/// Generic over its ports so the core never depends on skillmart-infra.
pub struct BookingService<B, P, C, I>
where
    B: BookingRepository,
    P: ProfileRepository,
    C: Clock,
    I: BookingIdGenerator,
{
    bookings: B,
    profiles: P,
    clock: C,
    ids: I,
    fee_policy: FeePolicy,
    default_currency: String,
    in_flight: InFlightGuard,
}

impl<B, P, C, I> BookingService<B, P, C, I>
where
    B: BookingRepository,
    P: ProfileRepository,
    C: Clock,
    I: BookingIdGenerator,
{
    pub fn new(bookings: B, profiles: P, clock: C, ids: I, config: &MarketplaceConfig) -> Self {
        Self {
            bookings,
            profiles,
            clock,
            ids,
            fee_policy: config.fees,
            default_currency: config.default_currency.clone(),
            in_flight: InFlightGuard::new(),
        }
    }

    /// Book one of a seller's packages.
    ///
    /// The package's price and revision allowance are copied onto the booking;
    /// later edits to the profile do not affect it.
    pub async fn create(&self, request: CreateBookingRequest) -> Result<Booking, BookingError> {
        if request.client_id.is_blank() || request.seller_id.is_blank() {
            return Err(BookingError::Validation(
                "client and seller ids are required".to_string(),
            ));
        }

        let profile = self
            .profiles
            .load(&request.seller_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("seller profile '{}'", request.seller_id))
            })?;
        if !profile.is_bookable() {
            return Err(BookingError::Validation(format!(
                "seller '{}' is not accepting bookings (profile is {})",
                request.seller_id,
                profile.status()
            )));
        }
        let package = profile.package(&request.package_id).ok_or_else(|| {
            BookingError::NotFound(format!(
                "package '{}' for seller '{}'",
                request.package_id, request.seller_id
            ))
        })?;

        let now = self.clock.now();
        let new = NewBooking {
            id: self.ids.next_id(now),
            client_id: request.client_id,
            seller_id: request.seller_id,
            service_id: package.id.clone(),
            agreed_price: package.price,
            currency: request
                .currency
                .unwrap_or_else(|| self.default_currency.clone()),
            max_revisions: package.revisions,
            expected_delivery: Some(now + Duration::days(i64::from(package.delivery_days))),
            requirements: request.requirements,
        };
        let booking = Booking::open(new, &self.fee_policy, now)?;
        let booking = self.bookings.save(&booking).await?;

        tracing::info!(
            booking_id = %booking.id(),
            seller_id = %booking.seller_id(),
            client_id = %booking.client_id(),
            agreed_price = %booking.agreed_price(),
            "booking created"
        );
        Ok(booking)
    }

    pub async fn get(&self, id: &BookingId) -> Result<Booking, BookingError> {
        self.bookings
            .load(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("booking '{id}'")))
    }

    pub async fn list_for_seller(
        &self,
        seller_id: &SellerId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError> {
        Ok(self.bookings.list_by_seller(seller_id, status).await?)
    }

    /// In-flight bookings past their expected delivery date.
    pub async fn overdue(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.bookings.list_overdue(self.clock.now()).await?)
    }

    pub async fn transition(
        &self,
        id: &BookingId,
        to: BookingStatus,
        actor: &Actor,
    ) -> Result<Booking, BookingError> {
        self.apply(id, "transition", |b, now| b.transition(to, actor, now))
            .await
    }

    pub async fn cancel(
        &self,
        id: &BookingId,
        reason: &str,
        cancelled_by: &Actor,
    ) -> Result<Booking, BookingError> {
        self.apply(id, "cancel", |b, now| b.cancel(reason, cancelled_by, now))
            .await
    }

    pub async fn dispute(
        &self,
        id: &BookingId,
        reason: &str,
        raised_by: &Actor,
    ) -> Result<Booking, BookingError> {
        self.apply(id, "dispute", |b, now| b.dispute(reason, raised_by, now))
            .await
    }

    pub async fn resolve_dispute(
        &self,
        id: &BookingId,
        outcome: DisputeOutcome,
        actor: &Actor,
    ) -> Result<Booking, BookingError> {
        self.apply(id, "resolve_dispute", |b, now| {
            b.resolve_dispute(outcome, actor, now)
        })
        .await
    }

    pub async fn request_revision(
        &self,
        id: &BookingId,
        details: &str,
        requested_by: &Actor,
    ) -> Result<Booking, BookingError> {
        self.apply(id, "request_revision", |b, now| {
            b.request_revision(details, requested_by, now)
        })
        .await
    }

    pub async fn add_deliverable(
        &self,
        id: &BookingId,
        deliverable: NewDeliverable,
        submitted_by: &Actor,
    ) -> Result<Booking, BookingError> {
        self.apply(id, "add_deliverable", |b, now| {
            b.add_deliverable(deliverable, submitted_by, now)
        })
        .await
    }

    pub async fn add_message(
        &self,
        id: &BookingId,
        body: &str,
        author: &Actor,
    ) -> Result<Booking, BookingError> {
        self.apply(id, "add_message", |b, now| b.add_message(body, author, now))
            .await
    }

    pub async fn renegotiate_price(
        &self,
        id: &BookingId,
        new_price: Decimal,
        actor: &Actor,
    ) -> Result<Booking, BookingError> {
        let policy = self.fee_policy;
        self.apply(id, "renegotiate_price", |b, now| {
            b.renegotiate_price(new_price, actor, &policy, now)
        })
        .await
    }

    pub async fn record_payment_failure(
        &self,
        id: &BookingId,
        actor: &Actor,
    ) -> Result<Booking, BookingError> {
        self.apply(id, "record_payment_failure", |b, now| {
            b.record_payment_failure(actor, now)
        })
        .await
    }

    pub fn fee_policy(&self) -> &FeePolicy {
        &self.fee_policy
    }

    /// Load, apply `op`, save, all under the booking's in-flight claim.
    async fn apply<F>(&self, id: &BookingId, op_name: &str, op: F) -> Result<Booking, BookingError>
    where
        F: FnOnce(&Booking, DateTime<Utc>) -> Result<Booking, BookingError> + Send,
    {
        let Some(_ticket) = self.in_flight.try_acquire(id) else {
            tracing::debug!(booking_id = %id, op = op_name, "rejected: operation in flight");
            return Err(BookingError::Conflict(format!(
                "booking '{id}' has another operation in flight"
            )));
        };

        let current = self.get(id).await?;
        let next = op(&current, self.clock.now())?;
        let saved = self.bookings.save(&next).await.map_err(|e| {
            tracing::debug!(booking_id = %id, op = op_name, error = %e, "save rejected");
            BookingError::from(e)
        })?;

        tracing::debug!(
            booking_id = %id,
            op = op_name,
            from = %current.status(),
            to = %saved.status(),
            version = saved.version(),
            "booking updated"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{
        FixedClock, InMemoryBookingRepository, InMemoryProfileRepository, SequentialIds, admin,
        client, seller, strong_submission,
    };
    use crate::profile::SellerProfile;
    use rust_decimal_macros::dec;
    use skillmart_types::booking::PaymentStatus;
    use skillmart_types::ids::{ClientId, PackageId};
    use skillmart_types::profile::ModerationAction;
    use skillmart_types::score::ReadinessReport;
    use tokio::sync::Barrier;

    type TestService = BookingService<
        InMemoryBookingRepository,
        InMemoryProfileRepository,
        FixedClock,
        SequentialIds,
    >;

    fn ready_report() -> ReadinessReport {
        ReadinessReport {
            ai_score: 90,
            content_quality: 85,
            profile_completeness: 100,
            recommendations: vec![],
            strengths: vec![],
            readiness: true,
        }
    }

    async fn seeded_profiles(clock: &FixedClock) -> InMemoryProfileRepository {
        let profiles = InMemoryProfileRepository::default();
        let mut profile =
            SellerProfile::draft(SellerId::new("seller-1"), strong_submission(), clock.now());
        profile.resubmit(strong_submission(), &ready_report(), clock.now());
        profiles.save(&profile).await.unwrap();
        profiles
    }

    async fn service_with(bookings: InMemoryBookingRepository) -> TestService {
        let clock = FixedClock::default();
        let profiles = seeded_profiles(&clock).await;
        BookingService::new(
            bookings,
            profiles,
            clock,
            SequentialIds::default(),
            &MarketplaceConfig::default(),
        )
    }

    fn request(package: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            client_id: ClientId::new("client-1"),
            seller_id: SellerId::new("seller-1"),
            package_id: PackageId::new(package),
            currency: None,
            requirements: Some("Landing page for a bakery".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_snapshots_package() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let booking = svc.create(request("standard")).await.unwrap();

        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.agreed_price(), dec!(250.00));
        assert_eq!(booking.platform_fee(), dec!(12.50));
        assert_eq!(booking.seller_earning(), dec!(237.50));
        assert_eq!(booking.max_revisions(), 2);
        assert_eq!(booking.currency(), "USD");
        assert_eq!(booking.version(), 1);
        assert_eq!(
            booking.expected_delivery(),
            Some(svc.clock.now() + Duration::days(7))
        );
        assert!(booking.id().as_str().starts_with("BK_"));

        let loaded = svc.get(booking.id()).await.unwrap();
        assert_eq!(loaded, booking);
    }

    #[tokio::test]
    async fn test_create_requires_bookable_seller() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let mut profile = svc.profiles.load(&SellerId::new("seller-1")).await.unwrap().unwrap();
        profile.moderate(ModerationAction::Suspend, svc.clock.now());
        svc.profiles.save(&profile).await.unwrap();

        let err = svc.create(request("standard")).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_unknown_seller_or_package() {
        let svc = service_with(InMemoryBookingRepository::default()).await;

        let err = svc.create(request("platinum")).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));

        let mut req = request("standard");
        req.seller_id = SellerId::new("seller-404");
        let err = svc.create(req).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_self_booking() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let mut req = request("basic");
        req.client_id = ClientId::new("seller-1");
        let err = svc.create(req).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn test_full_lifecycle_through_service() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let id = svc.create(request("premium")).await.unwrap().id().clone();

        svc.transition(&id, BookingStatus::Accepted, &seller()).await.unwrap();
        svc.transition(&id, BookingStatus::Paid, &client()).await.unwrap();
        svc.transition(&id, BookingStatus::InProgress, &seller()).await.unwrap();
        svc.add_deliverable(
            &id,
            NewDeliverable {
                title: "Homepage".into(),
                url: Some("https://files.example/home.zip".into()),
                note: String::new(),
            },
            &seller(),
        )
        .await
        .unwrap();
        svc.transition(&id, BookingStatus::Delivered, &seller()).await.unwrap();
        svc.request_revision(&id, "Bigger logo", &client()).await.unwrap();
        svc.transition(&id, BookingStatus::Delivered, &seller()).await.unwrap();
        let done = svc
            .transition(&id, BookingStatus::Completed, &client())
            .await
            .unwrap();

        assert_eq!(done.status(), BookingStatus::Completed);
        assert_eq!(done.payment_status(), PaymentStatus::Released);
        assert_eq!(done.revisions_used(), 1);
        assert_eq!(done.deliverables().len(), 1);
        assert_eq!(done.version(), 9);
    }

    #[tokio::test]
    async fn test_failed_operation_is_not_persisted() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let booking = svc.create(request("basic")).await.unwrap();

        let err = svc
            .transition(booking.id(), BookingStatus::Completed, &client())
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::IllegalTransition { .. }));
        assert_eq!(svc.get(booking.id()).await.unwrap(), booking);
        assert_eq!(svc.in_flight.active_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_booking() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let err = svc
            .cancel(&BookingId::new("BK_NOPE_000000"), "x", &client())
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_renegotiate_uses_configured_rate() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let id = svc.create(request("basic")).await.unwrap().id().clone();
        let updated = svc
            .renegotiate_price(&id, dec!(400.00), &seller())
            .await
            .unwrap();
        assert_eq!(updated.platform_fee(), dec!(20.00));
        assert_eq!(updated.seller_earning(), dec!(380.00));
    }

    #[tokio::test]
    async fn test_dispute_resolution_and_payment_failure() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let id = svc.create(request("basic")).await.unwrap().id().clone();
        svc.transition(&id, BookingStatus::Accepted, &seller()).await.unwrap();
        let failed = svc.record_payment_failure(&id, &Actor::System).await.unwrap();
        assert_eq!(failed.payment_status(), PaymentStatus::Failed);

        svc.transition(&id, BookingStatus::Paid, &client()).await.unwrap();
        svc.transition(&id, BookingStatus::InProgress, &seller()).await.unwrap();
        svc.dispute(&id, "No progress updates", &client()).await.unwrap();
        let refunded = svc
            .resolve_dispute(&id, DisputeOutcome::Refund, &admin())
            .await
            .unwrap();
        assert_eq!(refunded.status(), BookingStatus::Refunded);
        assert_eq!(refunded.payment_status(), PaymentStatus::Refunded);
    }

    #[tokio::test]
    async fn test_list_and_overdue() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let a = svc.create(request("basic")).await.unwrap().id().clone();
        let b = svc.create(request("standard")).await.unwrap().id().clone();
        svc.add_message(&b, "Any update?", &client()).await.unwrap();

        for status in [
            BookingStatus::Accepted,
            BookingStatus::Paid,
            BookingStatus::InProgress,
        ] {
            svc.transition(&a, status, &seller()).await.unwrap();
        }

        let seller_id = SellerId::new("seller-1");
        assert_eq!(svc.list_for_seller(&seller_id, None).await.unwrap().len(), 2);
        let in_progress = svc
            .list_for_seller(&seller_id, Some(BookingStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id(), &a);

        assert!(svc.overdue().await.unwrap().is_empty());
        svc.clock.advance(Duration::days(8));
        let overdue = svc.overdue().await.unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id(), &a);
    }

    #[tokio::test]
    async fn test_concurrent_operations_in_process_one_wins() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let id = svc.create(request("basic")).await.unwrap().id().clone();
        let (client, seller) = (client(), seller());

        let (cancelled, accepted) = tokio::join!(
            svc.cancel(&id, "Changed plans", &client),
            svc.transition(&id, BookingStatus::Accepted, &seller),
        );

        let outcomes = [cancelled.is_ok(), accepted.is_ok()];
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
        let loser = cancelled.err().or(accepted.err()).unwrap();
        assert!(matches!(loser, BookingError::Conflict(_)));
        assert_eq!(svc.get(&id).await.unwrap().version(), 2);
    }

    #[tokio::test]
    async fn test_revision_and_cancel_race_on_delivered_booking() {
        let svc = service_with(InMemoryBookingRepository::default()).await;
        let id = svc.create(request("standard")).await.unwrap().id().clone();
        let (client, seller) = (client(), seller());
        for status in [
            BookingStatus::Accepted,
            BookingStatus::Paid,
            BookingStatus::InProgress,
            BookingStatus::Delivered,
        ] {
            svc.transition(&id, status, &seller).await.unwrap();
        }

        let (revised, cancelled) = tokio::join!(
            svc.request_revision(&id, "Swap the hero image", &client),
            svc.cancel(&id, "Not what I wanted", &client),
        );

        let revised = revised.unwrap();
        assert!(matches!(cancelled, Err(BookingError::Conflict(_))));
        assert_eq!(revised.status(), BookingStatus::Revision);

        let stored = svc.get(&id).await.unwrap();
        assert_eq!(stored.version(), 6);
        assert_eq!(stored.revisions_used(), 1);
        assert!(stored.cancellation().is_none());
        assert!(!svc.in_flight.is_active(&id));
    }

    #[tokio::test]
    async fn test_concurrent_processes_caught_by_version_check() {
        let shared = InMemoryBookingRepository::default();
        let first = service_with(shared.clone()).await;
        let id = first.create(request("basic")).await.unwrap().id().clone();

        // Both services read version 1 before either writes.
        let barrier = Arc::new(Barrier::new(2));
        let first = service_with(shared.with_load_barrier(barrier.clone())).await;
        let second = service_with(shared.with_load_barrier(barrier)).await;
        let (client, seller) = (client(), seller());

        let (a, b) = tokio::join!(
            first.transition(&id, BookingStatus::Accepted, &seller),
            second.cancel(&id, "Found someone else", &client),
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let loser = a.err().or(b.err()).unwrap();
        assert!(matches!(loser, BookingError::Conflict(_)));
        assert_eq!(shared.load(&id).await.unwrap().unwrap().version(), 2);
    }
}
