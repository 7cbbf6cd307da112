//! Application state wiring all services together.
//!
//! Services are generic over repository, clock and id traits; AppState pins
//! them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use skillmart_core::service::booking::BookingService;
use skillmart_core::service::profile::ProfileService;
use skillmart_infra::clock::SystemClock;
use skillmart_infra::config::{load_config, resolve_data_dir};
use skillmart_infra::id::RandomBookingIdGenerator;
use skillmart_infra::sqlite::booking::SqliteBookingRepository;
use skillmart_infra::sqlite::pool::{DatabasePool, database_url};
use skillmart_infra::sqlite::profile::SqliteProfileRepository;
use skillmart_types::config::MarketplaceConfig;

pub type ConcreteProfileService = ProfileService<SqliteProfileRepository, SystemClock>;

pub type ConcreteBookingService = BookingService<
    SqliteBookingRepository,
    SqliteProfileRepository,
    SystemClock,
    RandomBookingIdGenerator,
>;

#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<ConcreteProfileService>,
    pub booking_service: Arc<ConcreteBookingService>,
    pub config: MarketplaceConfig,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, open the database and
    /// wire the services.
    pub async fn init() -> anyhow::Result<Self> {
        Self::init_in(resolve_data_dir()).await
    }

    pub async fn init_in(data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_pool = DatabasePool::new(&format!("{}?mode=rwc", database_url(&data_dir))).await?;

        let profile_service = ProfileService::new(
            SqliteProfileRepository::new(db_pool.clone()),
            SystemClock,
            config.readiness,
        );
        let booking_service = BookingService::new(
            SqliteBookingRepository::new(db_pool.clone()),
            SqliteProfileRepository::new(db_pool),
            SystemClock,
            RandomBookingIdGenerator,
            &config,
        );

        tracing::debug!(data_dir = %data_dir.display(), "application state ready");

        Ok(Self {
            profile_service: Arc::new(profile_service),
            booking_service: Arc::new(booking_service),
            config,
        })
    }
}
