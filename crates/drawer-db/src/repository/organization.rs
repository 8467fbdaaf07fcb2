//! # Organization Repository
//!
//! The organization name printed on reports. There is exactly one, stored
//! under the key [`DEFAULT_ORGANIZATION_KEY`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use drawer_core::DEFAULT_ORGANIZATION_KEY;

/// Repository for the organization record.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    pool: SqlitePool,
}

impl OrganizationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrganizationRepository { pool }
    }

    /// Returns the stored name, or an empty string when never set.
    pub async fn get(&self) -> DbResult<String> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM organization WHERE id = ?1")
            .bind(DEFAULT_ORGANIZATION_KEY)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name.unwrap_or_default())
    }

    /// Creates or replaces the stored name.
    pub async fn set(&self, name: &str) -> DbResult<()> {
        debug!(name = %name, "Saving organization name");

        sqlx::query(
            r#"
            INSERT INTO organization (id, name, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(DEFAULT_ORGANIZATION_KEY)
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
