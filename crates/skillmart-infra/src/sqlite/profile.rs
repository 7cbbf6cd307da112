//! SQLite seller profile repository.

use sqlx::Row;

use skillmart_core::profile::SellerProfile;
use skillmart_core::repository::profile::ProfileRepository;
use skillmart_types::error::RepositoryError;
use skillmart_types::ids::SellerId;

use super::pool::DatabasePool;
use super::{format_datetime, query_error};

pub struct SqliteProfileRepository {
    pool: DatabasePool,
}

impl SqliteProfileRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<SellerProfile, RepositoryError> {
    let document: String = row.try_get("document").map_err(query_error)?;
    serde_json::from_str(&document)
        .map_err(|e| RepositoryError::Query(format!("invalid profile document: {e}")))
}

impl ProfileRepository for SqliteProfileRepository {
    async fn load(&self, seller_id: &SellerId) -> Result<Option<SellerProfile>, RepositoryError> {
        let row = sqlx::query("SELECT document FROM seller_profiles WHERE seller_id = ?")
            .bind(seller_id.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(decode).transpose()
    }

    async fn save(&self, profile: &SellerProfile) -> Result<(), RepositoryError> {
        let document = serde_json::to_string(profile)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO seller_profiles (seller_id, status, ai_score, content_quality, marketplace_readiness, document, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(seller_id) DO UPDATE SET
                status = excluded.status,
                ai_score = excluded.ai_score,
                content_quality = excluded.content_quality,
                marketplace_readiness = excluded.marketplace_readiness,
                document = excluded.document,
                updated_at = excluded.updated_at",
        )
        .bind(profile.seller_id().as_str())
        .bind(profile.status().as_str())
        .bind(i64::from(profile.ai_score()))
        .bind(i64::from(profile.content_quality()))
        .bind(profile.marketplace_readiness())
        .bind(&document)
        .bind(format_datetime(&profile.created_at()))
        .bind(format_datetime(&profile.updated_at()))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        tracing::debug!(seller_id = %profile.seller_id(), status = %profile.status(), "profile saved");
        Ok(())
    }
}
