//! # Shift Store
//!
//! The persistence gateway the lifecycle manager talks to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShiftManager                                                           │
//! │       │  Arc<dyn ShiftStore>                                            │
//! │       ▼                                                                 │
//! │  ┌──────────────────────┐        ┌──────────────────────┐               │
//! │  │  SqliteShiftStore    │        │  MemoryShiftStore    │               │
//! │  │  Database + repos    │        │  RwLock<HashMap>     │               │
//! │  │  survives restarts   │        │  tests, scratch use  │               │
//! │  └──────────────────────┘        └──────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both implementations share the same contract:
//! - `save` inserts a record at `sync_version == 1` and otherwise updates
//!   only if the stored version is `sync_version - 1`.
//! - Listings are newest `open_time` first.
//! - Only closed shifts can be bulk-deleted.
//! - A second open shift on the same drawer is a `UniqueViolation`.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use drawer_core::{ShiftRecord, ShiftStatus};

/// Storage for shift records and the organization name.
#[async_trait]
pub trait ShiftStore: Send + Sync {
    /// Persists a record; see the module docs for the version rule.
    async fn save(&self, record: &ShiftRecord) -> DbResult<()>;

    /// Every shift, newest `open_time` first.
    async fn get_all(&self) -> DbResult<Vec<ShiftRecord>>;

    async fn get_by_id(&self, id: &str) -> DbResult<Option<ShiftRecord>>;

    /// Shifts with the given status, newest `open_time` first.
    async fn get_by_status(&self, status: ShiftStatus) -> DbResult<Vec<ShiftRecord>>;

    /// Deletes every shift with the given status. Open shifts are refused.
    async fn delete_where_status(&self, status: ShiftStatus) -> DbResult<u64>;

    async fn save_organization(&self, name: &str) -> DbResult<()>;

    /// The stored organization name; empty when never set.
    async fn get_organization(&self) -> DbResult<String>;
}

fn refuse_open_delete(status: ShiftStatus) -> DbResult<()> {
    if status == ShiftStatus::Open {
        return Err(DbError::InvalidRequest(
            "open shifts cannot be deleted".to_string(),
        ));
    }
    Ok(())
}

fn check_version(record: &ShiftRecord) -> DbResult<()> {
    if record.sync_version < 1 {
        return Err(DbError::InvalidRequest(format!(
            "shift {} has invalid version {}",
            record.id, record.sync_version
        )));
    }
    Ok(())
}

fn newest_first(records: &mut [ShiftRecord]) {
    records.sort_by(|a, b| b.open_time.cmp(&a.open_time).then_with(|| a.id.cmp(&b.id)));
}

// =============================================================================
// SQLite
// =============================================================================

/// Durable store backed by the SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteShiftStore {
    db: Database,
}

impl SqliteShiftStore {
    pub fn new(db: Database) -> Self {
        SqliteShiftStore { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ShiftStore for SqliteShiftStore {
    async fn save(&self, record: &ShiftRecord) -> DbResult<()> {
        check_version(record)?;

        if record.sync_version == 1 {
            self.db.shifts().insert(record).await
        } else {
            self.db.shifts().update(record).await
        }
    }

    async fn get_all(&self) -> DbResult<Vec<ShiftRecord>> {
        self.db.shifts().list_all().await
    }

    async fn get_by_id(&self, id: &str) -> DbResult<Option<ShiftRecord>> {
        self.db.shifts().get_by_id(id).await
    }

    async fn get_by_status(&self, status: ShiftStatus) -> DbResult<Vec<ShiftRecord>> {
        self.db.shifts().list_by_status(status).await
    }

    async fn delete_where_status(&self, status: ShiftStatus) -> DbResult<u64> {
        refuse_open_delete(status)?;
        self.db.shifts().delete_by_status(status).await
    }

    async fn save_organization(&self, name: &str) -> DbResult<()> {
        self.db.organization().set(name).await
    }

    async fn get_organization(&self) -> DbResult<String> {
        self.db.organization().get().await
    }
}

// =============================================================================
// In-Memory
// =============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    shifts: HashMap<String, ShiftRecord>,
    organization: String,
}

/// Ephemeral store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryShiftStore {
    state: RwLock<MemoryState>,
}

impl MemoryShiftStore {
    pub fn new() -> Self {
        MemoryShiftStore::default()
    }
}

#[async_trait]
impl ShiftStore for MemoryShiftStore {
    async fn save(&self, record: &ShiftRecord) -> DbResult<()> {
        check_version(record)?;
        let mut state = self.state.write().await;

        match state.shifts.get(&record.id) {
            None if record.sync_version == 1 => {}
            None => return Err(DbError::not_found("Shift", &record.id)),
            Some(_) if record.sync_version == 1 => {
                return Err(DbError::conflict("Shift", &record.id, 0));
            }
            Some(stored) if stored.sync_version != record.sync_version - 1 => {
                return Err(DbError::conflict("Shift", &record.id, record.sync_version - 1));
            }
            Some(_) => {}
        }

        // Same rule as the partial unique index on open drawers
        if record.is_open() {
            let taken = state.shifts.values().any(|s| {
                s.is_open() && s.id != record.id && s.drawer_number == record.drawer_number
            });
            if taken {
                return Err(DbError::duplicate(
                    "shifts.drawer_number",
                    &record.drawer_number,
                ));
            }
        }

        state.shifts.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get_all(&self) -> DbResult<Vec<ShiftRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<ShiftRecord> = state.shifts.values().cloned().collect();
        newest_first(&mut records);
        Ok(records)
    }

    async fn get_by_id(&self, id: &str) -> DbResult<Option<ShiftRecord>> {
        Ok(self.state.read().await.shifts.get(id).cloned())
    }

    async fn get_by_status(&self, status: ShiftStatus) -> DbResult<Vec<ShiftRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<ShiftRecord> = state
            .shifts
            .values()
            .filter(|s| s.status == status)
            .cloned()
            .collect();
        newest_first(&mut records);
        Ok(records)
    }

    async fn delete_where_status(&self, status: ShiftStatus) -> DbResult<u64> {
        refuse_open_delete(status)?;
        let mut state = self.state.write().await;

        let before = state.shifts.len();
        state.shifts.retain(|_, s| s.status != status);
        Ok((before - state.shifts.len()) as u64)
    }

    async fn save_organization(&self, name: &str) -> DbResult<()> {
        self.state.write().await.organization = name.to_string();
        Ok(())
    }

    async fn get_organization(&self) -> DbResult<String> {
        Ok(self.state.read().await.organization.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
