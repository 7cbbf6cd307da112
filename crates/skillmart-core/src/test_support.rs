//! In-memory ports and fixtures shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Barrier;

use skillmart_types::booking::{Actor, BookingStatus};
use skillmart_types::config::FeePolicy;
use skillmart_types::error::RepositoryError;
use skillmart_types::ids::{BookingId, ClientId, PackageId, SellerId};
use skillmart_types::profile::{PortfolioItem, ProfileSubmission, ServicePackage};

use crate::booking::{Booking, NewBooking, policy};
use crate::profile::SellerProfile;
use crate::repository::booking::BookingRepository;
use crate::repository::profile::ProfileRepository;
use crate::service::clock::Clock;
use crate::service::id::{BookingIdGenerator, format_booking_id};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap()
}

/// `t0` plus `minutes`.
pub fn tick(minutes: i64) -> DateTime<Utc> {
    t0() + Duration::minutes(minutes)
}

pub fn client() -> Actor {
    Actor::Client(ClientId::new("client-1"))
}

pub fn seller() -> Actor {
    Actor::Seller(SellerId::new("seller-1"))
}

pub fn admin() -> Actor {
    Actor::Admin("ops".to_string())
}

pub fn new_booking(price: Decimal, max_revisions: u32) -> NewBooking {
    NewBooking {
        id: BookingId::new("BK_TEST_000001"),
        client_id: ClientId::new("client-1"),
        seller_id: SellerId::new("seller-1"),
        service_id: PackageId::new("standard"),
        agreed_price: price,
        currency: "usd".to_string(),
        max_revisions,
        expected_delivery: Some(t0() + Duration::days(7)),
        requirements: Some("Logo and brand colours for a coffee shop".to_string()),
    }
}

/// A fresh pending booking opened at `t0`.
pub fn open_booking(price: i64, max_revisions: u32) -> Booking {
    Booking::open(
        new_booking(Decimal::from(price), max_revisions),
        &FeePolicy::default(),
        t0(),
    )
    .unwrap()
}

/// A booking walked through to `delivered`, one minute per step.
pub fn delivered_booking(max_revisions: u32) -> Booking {
    let mut booking = open_booking(500, max_revisions);
    for (i, to) in [
        BookingStatus::Accepted,
        BookingStatus::Paid,
        BookingStatus::InProgress,
        BookingStatus::Delivered,
    ]
    .into_iter()
    .enumerate()
    {
        booking = booking.transition(to, &seller(), tick(i as i64 + 1)).unwrap();
    }
    booking
}

/// A complete, well-written submission that clears the default gate.
pub fn strong_submission() -> ProfileSubmission {
    let paragraph = "I am a professional full stack developer with proven expertise in react, \
        typescript, node and rust. I deliver quality solutions for your business on every \
        project, with clear communication and reliable deadlines. ";
    ProfileSubmission {
        title: "Senior Full Stack Engineer".to_string(),
        bio: paragraph.repeat(12),
        business_description: "Web applications for growing businesses and their clients."
            .to_string(),
        unique_selling_proposition: "Production-ready code with a 30 day bug guarantee."
            .to_string(),
        experience: "Eight years building SaaS platforms.".to_string(),
        skills: vec!["react".into(), "rust".into(), "postgres".into()],
        portfolio: (1..=5)
            .map(|i| PortfolioItem {
                title: format!("Case study {i}"),
                description: String::new(),
                url: None,
            })
            .collect(),
        packages: [("basic", 2), ("standard", 2), ("premium", 3)]
            .iter()
            .map(|(name, revisions)| ServicePackage {
                id: PackageId::new(*name),
                name: name.to_string(),
                description: String::new(),
                price: dec!(250.00),
                delivery_days: 7,
                revisions: *revisions,
            })
            .collect(),
        certifications: vec!["AWS Solutions Architect".into()],
        languages: vec!["English".into()],
        showcase_video_url: Some("https://video.example/intro".into()),
        profile_image_url: Some("https://img.example/me.png".into()),
    }
}

/// Clock pinned to `t0` until advanced.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(t0()),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Ids with a zero-padded counter as the suffix.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl BookingIdGenerator for SequentialIds {
    fn next_id(&self, now: DateTime<Utc>) -> BookingId {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format_booking_id(now.timestamp_millis(), &format!("{n:06}"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<SellerId, SellerProfile>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    async fn load(&self, seller_id: &SellerId) -> Result<Option<SellerProfile>, RepositoryError> {
        Ok(self.profiles.lock().unwrap().get(seller_id).cloned())
    }

    async fn save(&self, profile: &SellerProfile) -> Result<(), RepositoryError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.seller_id().clone(), profile.clone());
        Ok(())
    }
}

/// Clones share storage. `load` always suspends once so concurrent callers
/// interleave; with a barrier attached it waits until every holder has loaded.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<Mutex<HashMap<BookingId, Booking>>>,
    load_barrier: Option<Arc<Barrier>>,
}

impl InMemoryBookingRepository {
    pub fn with_load_barrier(&self, barrier: Arc<Barrier>) -> Self {
        Self {
            bookings: Arc::clone(&self.bookings),
            load_barrier: Some(barrier),
        }
    }

    fn snapshot(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().values().cloned().collect()
    }
}

impl BookingRepository for InMemoryBookingRepository {
    async fn load(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let found = self.bookings.lock().unwrap().get(id).cloned();
        match &self.load_barrier {
            Some(barrier) => {
                barrier.wait().await;
            }
            None => tokio::task::yield_now().await,
        }
        Ok(found)
    }

    async fn save(&self, booking: &Booking) -> Result<Booking, RepositoryError> {
        let mut bookings = self.bookings.lock().unwrap();
        let stored_version = bookings.get(booking.id()).map(Booking::version);
        match (booking.version(), stored_version) {
            (0, Some(_)) => {
                return Err(RepositoryError::Conflict(format!(
                    "booking '{}' already exists",
                    booking.id()
                )));
            }
            (0, None) => {}
            (_, None) => return Err(RepositoryError::NotFound),
            (expected, Some(actual)) if expected != actual => {
                return Err(RepositoryError::Conflict(format!(
                    "booking '{}' is at version {actual}, expected {expected}",
                    booking.id()
                )));
            }
            _ => {}
        }
        let committed = booking.clone().into_committed();
        bookings.insert(committed.id().clone(), committed.clone());
        Ok(committed)
    }

    async fn list_by_seller(
        &self,
        seller_id: &SellerId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let mut found: Vec<Booking> = self
            .snapshot()
            .into_iter()
            .filter(|b| b.seller_id() == seller_id)
            .filter(|b| status.is_none_or(|s| b.status() == s))
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(found)
    }

    async fn list_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Booking>, RepositoryError> {
        let mut found: Vec<Booking> = self
            .snapshot()
            .into_iter()
            .filter(|b| policy::work_in_flight(b.status()) && b.is_overdue(now))
            .collect();
        found.sort_by_key(|b| b.expected_delivery());
        Ok(found)
    }
}
