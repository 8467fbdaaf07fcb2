//! # Shift Repository
//!
//! SQL for the `shifts` table.
//!
//! ## Versioned Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record.sync_version == 1          record.sync_version == n > 1         │
//! │          │                                  │                           │
//! │          ▼                                  ▼                           │
//! │  INSERT                            UPDATE ... WHERE id = ?              │
//! │    │                                        AND sync_version = n - 1    │
//! │    ├── id taken ──► Conflict                │                           │
//! │    └── drawer open ──► UniqueViolation      ├── 1 row  ──► ok           │
//! │                                             ├── 0 rows, id exists       │
//! │                                             │         ──► Conflict      │
//! │                                             └── 0 rows ──► NotFound     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entry snapshots are stored as JSON arrays in TEXT columns.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use drawer_core::{CashEntry, Money, ShiftRecord, ShiftStatus};

const SHIFT_COLUMNS: &str = r#"
    id, organization_name, drawer_number, cashier_name,
    open_time, close_time,
    opening_balance_cents, closing_balance_cents, shift_drop_cents,
    opening_entries, entries, status, sync_version
"#;

/// One `shifts` row as SQLite returns it.
#[derive(Debug, sqlx::FromRow)]
struct ShiftRow {
    id: String,
    organization_name: Option<String>,
    drawer_number: String,
    cashier_name: String,
    open_time: DateTime<Utc>,
    close_time: Option<DateTime<Utc>>,
    opening_balance_cents: i64,
    closing_balance_cents: Option<i64>,
    shift_drop_cents: Option<i64>,
    opening_entries: String,
    entries: String,
    status: ShiftStatus,
    sync_version: i64,
}

impl TryFrom<ShiftRow> for ShiftRecord {
    type Error = DbError;

    fn try_from(row: ShiftRow) -> DbResult<Self> {
        let opening_entries: Vec<CashEntry> = serde_json::from_str(&row.opening_entries)?;
        let entries: Vec<CashEntry> = serde_json::from_str(&row.entries)?;

        Ok(ShiftRecord {
            id: row.id,
            organization_name: row.organization_name,
            drawer_number: row.drawer_number,
            cashier_name: row.cashier_name,
            open_time: row.open_time,
            close_time: row.close_time,
            opening_balance: Money::from_cents(row.opening_balance_cents),
            closing_balance: row.closing_balance_cents.map(Money::from_cents),
            shift_drop: row.shift_drop_cents.map(Money::from_cents),
            opening_entries,
            entries,
            status: row.status,
            sync_version: row.sync_version,
        })
    }
}

fn into_records(rows: Vec<ShiftRow>) -> DbResult<Vec<ShiftRecord>> {
    rows.into_iter().map(ShiftRecord::try_from).collect()
}

/// Repository for shift database operations.
#[derive(Debug, Clone)]
pub struct ShiftRepository {
    pool: SqlitePool,
}

impl ShiftRepository {
    /// Creates a new ShiftRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShiftRepository { pool }
    }

    /// Gets a shift by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ShiftRecord>> {
        let sql = format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1");
        let row: Option<ShiftRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ShiftRecord::try_from).transpose()
    }

    /// Lists every shift, newest `open_time` first.
    pub async fn list_all(&self) -> DbResult<Vec<ShiftRecord>> {
        let sql = format!("SELECT {SHIFT_COLUMNS} FROM shifts ORDER BY open_time DESC, id");
        let rows: Vec<ShiftRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        into_records(rows)
    }

    /// Lists shifts with the given status, newest `open_time` first.
    pub async fn list_by_status(&self, status: ShiftStatus) -> DbResult<Vec<ShiftRecord>> {
        let sql = format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts WHERE status = ?1 ORDER BY open_time DESC, id"
        );
        let rows: Vec<ShiftRow> = sqlx::query_as(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        into_records(rows)
    }

    /// Inserts a new shift at version 1.
    pub async fn insert(&self, shift: &ShiftRecord) -> DbResult<()> {
        debug!(id = %shift.id, drawer = %shift.drawer_number, "Inserting shift");

        let opening_entries = serde_json::to_string(&shift.opening_entries)?;
        let entries = serde_json::to_string(&shift.entries)?;

        let result = sqlx::query(
            r#"
            INSERT INTO shifts (
                id, organization_name, drawer_number, cashier_name,
                open_time, close_time,
                opening_balance_cents, closing_balance_cents, shift_drop_cents,
                opening_entries, entries, status, sync_version
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6,
                ?7, ?8, ?9,
                ?10, ?11, ?12, ?13
            )
            "#,
        )
        .bind(&shift.id)
        .bind(&shift.organization_name)
        .bind(&shift.drawer_number)
        .bind(&shift.cashier_name)
        .bind(shift.open_time)
        .bind(shift.close_time)
        .bind(shift.opening_balance.cents())
        .bind(shift.closing_balance.map(|m| m.cents()))
        .bind(shift.shift_drop.map(|m| m.cents()))
        .bind(opening_entries)
        .bind(entries)
        .bind(shift.status)
        .bind(shift.sync_version)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => Err(match DbError::from(err) {
                DbError::UniqueViolation { field, .. } if field == "shifts.id" => {
                    DbError::conflict("Shift", &shift.id, 0)
                }
                DbError::UniqueViolation { field, .. } if field == "shifts.drawer_number" => {
                    DbError::duplicate(field, &shift.drawer_number)
                }
                other => other,
            }),
        }
    }

    /// Writes `shift` over the stored row if that row is at
    /// `shift.sync_version - 1`.
    pub async fn update(&self, shift: &ShiftRecord) -> DbResult<()> {
        let expected_version = shift.sync_version - 1;
        debug!(
            id = %shift.id,
            version = shift.sync_version,
            status = %shift.status,
            "Updating shift"
        );

        let opening_entries = serde_json::to_string(&shift.opening_entries)?;
        let entries = serde_json::to_string(&shift.entries)?;

        let result = sqlx::query(
            r#"
            UPDATE shifts SET
                organization_name = ?2,
                drawer_number = ?3,
                cashier_name = ?4,
                open_time = ?5,
                close_time = ?6,
                opening_balance_cents = ?7,
                closing_balance_cents = ?8,
                shift_drop_cents = ?9,
                opening_entries = ?10,
                entries = ?11,
                status = ?12,
                sync_version = ?13
            WHERE id = ?1 AND sync_version = ?14
            "#,
        )
        .bind(&shift.id)
        .bind(&shift.organization_name)
        .bind(&shift.drawer_number)
        .bind(&shift.cashier_name)
        .bind(shift.open_time)
        .bind(shift.close_time)
        .bind(shift.opening_balance.cents())
        .bind(shift.closing_balance.map(|m| m.cents()))
        .bind(shift.shift_drop.map(|m| m.cents()))
        .bind(opening_entries)
        .bind(entries)
        .bind(shift.status)
        .bind(shift.sync_version)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT sync_version FROM shifts WHERE id = ?1")
                    .bind(&shift.id)
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match exists {
                Some(_) => DbError::conflict("Shift", &shift.id, expected_version),
                None => DbError::not_found("Shift", &shift.id),
            });
        }

        Ok(())
    }

    /// Deletes every shift with the given status; returns how many went.
    pub async fn delete_by_status(&self, status: ShiftStatus) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM shifts WHERE status = ?1")
            .bind(status)
            .execute(&self.pool)
            .await?;

        debug!(status = %status, deleted = result.rows_affected(), "Deleted shifts");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;
    use drawer_core::ledger::upsert;
    use drawer_core::CashKind;

    async fn repo() -> ShiftRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().shifts()
    }

    fn shift(drawer: &str) -> ShiftRecord {
        let opening = upsert(&[], CashKind::Bill, Money::from_dollars(20), 2).unwrap();
        ShiftRecord {
            id: uuid::Uuid::new_v4().to_string(),
            organization_name: Some("Corner Store".to_string()),
            drawer_number: drawer.to_string(),
            cashier_name: "Dana".to_string(),
            open_time: Utc::now(),
            close_time: None,
            opening_balance: Money::from_dollars(40),
            closing_balance: None,
            shift_drop: None,
            entries: opening.clone(),
            opening_entries: opening,
            status: ShiftStatus::Open,
            sync_version: 1,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let record = shift("5");

        repo.insert(&record).await.unwrap();
        let loaded = repo.get_by_id(&record.id).await.unwrap().unwrap();

        assert_eq!(loaded.id, record.id);
        assert_eq!(loaded.opening_entries, record.opening_entries);
        assert_eq!(loaded.opening_balance, Money::from_dollars(40));
        assert_eq!(loaded.status, ShiftStatus::Open);
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_open_shift_on_drawer_rejected() {
        let repo = repo().await;
        repo.insert(&shift("5")).await.unwrap();

        let err = repo.insert(&shift("5")).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value }
                if field == "shifts.drawer_number" && value == "5"
        ));
    }

    #[tokio::test]
    async fn test_closed_shift_frees_drawer() {
        let repo = repo().await;
        let mut first = shift("5");
        repo.insert(&first).await.unwrap();

        first.status = ShiftStatus::Closed;
        first.close_time = Some(Utc::now());
        first.closing_balance = Some(Money::from_dollars(40));
        first.sync_version = 2;
        repo.update(&first).await.unwrap();

        repo.insert(&shift("5")).await.unwrap();
        assert_eq!(repo.list_by_status(ShiftStatus::Open).await.unwrap().len(), 1);
        assert_eq!(repo.list_by_status(ShiftStatus::Closed).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_update_conflicts() {
        let repo = repo().await;
        let mut record = shift("1");
        repo.insert(&record).await.unwrap();

        record.entries = upsert(&record.entries, CashKind::Coin, Money::from_cents(25), 4).unwrap();
        record.sync_version = 2;
        repo.update(&record).await.unwrap();

        // A second writer still holding version 1
        let mut stale = record.clone();
        stale.entries.clear();
        stale.sync_version = 2;
        let err = repo.update(&stale).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { expected_version: 1, .. }));

        let stored = repo.get_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(stored.entries, record.entries);
        assert_eq!(stored.sync_version, 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_insert_conflicts() {
        let repo = repo().await;
        let record = shift("1");
        repo.insert(&record).await.unwrap();

        let mut again = record.clone();
        again.drawer_number = "2".to_string();
        assert!(matches!(
            repo.insert(&again).await,
            Err(DbError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_shift() {
        let repo = repo().await;
        let mut record = shift("1");
        record.sync_version = 2;

        assert!(matches!(
            repo.update(&record).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_listing_order_and_delete() {
        let repo = repo().await;
        let mut older = shift("1");
        older.open_time = Utc::now() - Duration::hours(8);
        older.status = ShiftStatus::Closed;
        older.close_time = Some(Utc::now() - Duration::hours(1));
        older.closing_balance = Some(Money::from_dollars(40));
        let newer = shift("2");

        repo.insert(&older).await.unwrap();
        repo.insert(&newer).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);

        let closed = repo.list_by_status(ShiftStatus::Closed).await.unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].id, older.id);

        assert_eq!(repo.delete_by_status(ShiftStatus::Closed).await.unwrap(), 1);
        let remaining = repo.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, newer.id);
    }
}
