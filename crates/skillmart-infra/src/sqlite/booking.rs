//! SQLite booking repository.
//!
//! Implements `BookingRepository` from `skillmart-core`. Writes are a
//! compare-and-swap on the `version` column, which makes concurrent writers
//! from separate processes lose with `Conflict` instead of overwriting.

use chrono::{DateTime, Utc};
use sqlx::Row;

use skillmart_core::booking::{Booking, policy};
use skillmart_core::repository::booking::BookingRepository;
use skillmart_types::booking::BookingStatus;
use skillmart_types::error::RepositoryError;
use skillmart_types::ids::{BookingId, SellerId};

use super::pool::DatabasePool;
use super::{format_datetime, query_error};

pub struct SqliteBookingRepository {
    pool: DatabasePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Distinguish "someone else wrote first" from "no such booking" after
    /// an UPDATE matched nothing.
    async fn stored_version(&self, id: &BookingId) -> Result<Option<i64>, RepositoryError> {
        let row = sqlx::query("SELECT version FROM bookings WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool.writer)
            .await
            .map_err(query_error)?;
        row.map(|r| r.try_get::<i64, _>("version"))
            .transpose()
            .map_err(query_error)
    }

    async fn fetch_documents<'q>(
        &self,
        query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows.iter()
            .map(|row| {
                BookingRow::from_row(row)
                    .map_err(query_error)
                    .and_then(BookingRow::into_booking)
            })
            .collect()
    }
}

/// Internal row type: the JSON document plus the authoritative version.
struct BookingRow {
    document: String,
    version: i64,
}

impl BookingRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            document: row.try_get("document")?,
            version: row.try_get("version")?,
        })
    }

    fn into_booking(self) -> Result<Booking, RepositoryError> {
        let booking: Booking = serde_json::from_str(&self.document)
            .map_err(|e| RepositoryError::Query(format!("invalid booking document: {e}")))?;
        if i64::try_from(booking.version()).ok() != Some(self.version) {
            return Err(RepositoryError::Query(format!(
                "booking '{}' document is at version {} but the row is at {}",
                booking.id(),
                booking.version(),
                self.version
            )));
        }
        Ok(booking)
    }
}

fn to_i64(version: u64) -> Result<i64, RepositoryError> {
    i64::try_from(version).map_err(|_| RepositoryError::Query(format!("version {version} overflows")))
}

impl BookingRepository for SqliteBookingRepository {
    async fn load(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query("SELECT document, version FROM bookings WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let booking_row = BookingRow::from_row(&row).map_err(query_error)?;
                Ok(Some(booking_row.into_booking()?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, booking: &Booking) -> Result<Booking, RepositoryError> {
        let expected = to_i64(booking.version())?;
        let committed = booking.clone().into_committed();
        let document = serde_json::to_string(&committed)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let expected_delivery = committed.expected_delivery().as_ref().map(format_datetime);

        if expected == 0 {
            let result = sqlx::query(
                "INSERT INTO bookings (id, seller_id, client_id, status, agreed_price, currency, expected_delivery, version, document, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(committed.id().as_str())
            .bind(committed.seller_id().as_str())
            .bind(committed.client_id().as_str())
            .bind(committed.status().as_str())
            .bind(committed.agreed_price().to_string())
            .bind(committed.currency())
            .bind(expected_delivery)
            .bind(to_i64(committed.version())?)
            .bind(&document)
            .bind(format_datetime(&committed.created_at()))
            .bind(format_datetime(&committed.updated_at()))
            .execute(&self.pool.writer)
            .await;

            return match result {
                Ok(_) => Ok(committed),
                Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                    Err(RepositoryError::Conflict(format!(
                        "booking '{}' already exists",
                        committed.id()
                    )))
                }
                Err(e) => Err(query_error(e)),
            };
        }

        let result = sqlx::query(
            "UPDATE bookings
             SET status = ?, agreed_price = ?, expected_delivery = ?, version = ?, document = ?, updated_at = ?
             WHERE id = ? AND version = ?",
        )
        .bind(committed.status().as_str())
        .bind(committed.agreed_price().to_string())
        .bind(expected_delivery)
        .bind(to_i64(committed.version())?)
        .bind(&document)
        .bind(format_datetime(&committed.updated_at()))
        .bind(committed.id().as_str())
        .bind(expected)
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return match self.stored_version(committed.id()).await? {
                Some(actual) => {
                    tracing::debug!(
                        booking_id = %committed.id(),
                        expected,
                        actual,
                        "stale booking write rejected"
                    );
                    Err(RepositoryError::Conflict(format!(
                        "booking '{}' is at version {actual}, expected {expected}",
                        committed.id()
                    )))
                }
                None => Err(RepositoryError::NotFound),
            };
        }

        Ok(committed)
    }

    async fn list_by_seller(
        &self,
        seller_id: &SellerId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let query = match status {
            Some(status) => sqlx::query(
                "SELECT document, version FROM bookings
                 WHERE seller_id = ? AND status = ?
                 ORDER BY created_at DESC, id DESC",
            )
            .bind(seller_id.as_str())
            .bind(status.as_str()),
            None => sqlx::query(
                "SELECT document, version FROM bookings
                 WHERE seller_id = ?
                 ORDER BY created_at DESC, id DESC",
            )
            .bind(seller_id.as_str()),
        };
        self.fetch_documents(query).await
    }

    async fn list_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Booking>, RepositoryError> {
        let in_flight: Vec<&'static str> = BookingStatus::ALL
            .into_iter()
            .filter(|s| policy::work_in_flight(*s))
            .map(|s| s.as_str())
            .collect();
        let placeholders = vec!["?"; in_flight.len()].join(", ");
        let sql = format!(
            "SELECT document, version FROM bookings
             WHERE status IN ({placeholders})
               AND expected_delivery IS NOT NULL
               AND expected_delivery < ?
             ORDER BY expected_delivery ASC, id ASC"
        );

        let mut query = sqlx::query(&sql);
        for status in in_flight {
            query = query.bind(status);
        }
        let query = query.bind(format_datetime(&now));
        self.fetch_documents(query).await
    }
}
