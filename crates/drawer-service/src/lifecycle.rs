//! # Shift Lifecycle Manager
//!
//! Opens, edits and closes drawer shifts.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start_shift ──► ┌──────┐  update_live_entry (every keystroke)          │
//! │                  │ Open │◄───────────────┐                              │
//! │                  └──┬───┘────────────────┘                              │
//! │                     │ end_shift(drop)                                   │
//! │                     ▼                                                   │
//! │                  ┌────────┐                                             │
//! │                  │ Closed │  terminal; removed only by clear_history    │
//! │                  └────────┘                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Atomicity
//! Every operation takes the caller's current record by reference and
//! returns the next one only after the store accepted it. If the write
//! fails, the caller still holds the last persisted value and the store is
//! unchanged.
//!
//! Each successful write bumps `sync_version`; handing in an out-of-date
//! record yields `CONFLICT` instead of overwriting newer data.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use drawer_core::ledger::{ledger_total, upsert};
use drawer_core::shift::{ensure_open, preview_close};
use drawer_core::validation::{
    normalize_organization_name, validate_cashier_name, validate_drawer_number,
    validate_entry_set, validate_shift_drop, validate_shift_id,
};
use drawer_core::{
    CashEntry, CashKind, CoreError, HistoryReport, Money, ShiftBoard, ShiftRecord, ShiftReport,
    ShiftStatus,
};
use drawer_db::{Database, ShiftStore, SqliteShiftStore};

use crate::config::DrawerConfig;
use crate::error::ServiceResult;
use crate::report::{DirectoryReportSink, ReportSink};

/// Result of closing a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedShift {
    /// The persisted, closed record.
    pub record: ShiftRecord,
    /// `closing_balance - opening_balance`; any sign.
    pub difference: Money,
}

/// Drives shifts through their lifecycle against an injected store.
pub struct ShiftManager {
    store: Arc<dyn ShiftStore>,
    reports: Option<Arc<dyn ReportSink>>,
    default_organization: Option<String>,
}

impl ShiftManager {
    /// Manager over `store`, without a report sink.
    pub fn new(store: Arc<dyn ShiftStore>) -> Self {
        ShiftManager {
            store,
            reports: None,
            default_organization: None,
        }
    }

    /// Hands closed-shift and history reports to `sink`.
    pub fn with_report_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.reports = Some(sink);
        self
    }

    /// Organization used when neither the caller nor the store has one.
    pub fn with_default_organization(mut self, name: Option<String>) -> Self {
        self.default_organization = name.filter(|n| !n.trim().is_empty());
        self
    }

    /// Opens the SQLite database named by `config` and wires everything up.
    pub async fn from_config(config: &DrawerConfig) -> ServiceResult<Self> {
        let db = Database::new(config.db_config()).await?;

        info!(
            database = %config.database_path.display(),
            reports = %config.reports_dir.display(),
            "Shift manager ready"
        );

        Ok(ShiftManager::new(Arc::new(SqliteShiftStore::new(db)))
            .with_report_sink(Arc::new(DirectoryReportSink::from_config(config)))
            .with_default_organization(config.default_organization.clone()))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens a new shift on `drawer_number`.
    ///
    /// ## Errors
    /// - `VALIDATION_ERROR`: blank drawer or cashier, or a malformed opening count
    /// - `DUPLICATE_DRAWER`: the drawer already has an open shift
    pub async fn start_shift(
        &self,
        drawer_number: &str,
        cashier_name: &str,
        organization_name: Option<&str>,
        opening_entries: Vec<CashEntry>,
    ) -> ServiceResult<ShiftRecord> {
        let drawer_number = validate_drawer_number(drawer_number)?;
        let cashier_name = validate_cashier_name(cashier_name)?;
        let organization_name = normalize_organization_name(organization_name)?;
        validate_entry_set(&opening_entries)?;

        let open_shifts = self.store.get_by_status(ShiftStatus::Open).await?;
        if open_shifts.iter().any(|s| s.drawer_number == drawer_number) {
            return Err(CoreError::DuplicateDrawer { drawer_number }.into());
        }

        let organization_name = match organization_name {
            Some(name) => Some(name),
            None => self.fallback_organization().await?,
        };

        let record = ShiftRecord {
            id: Uuid::new_v4().to_string(),
            organization_name,
            drawer_number,
            cashier_name,
            open_time: Utc::now(),
            close_time: None,
            opening_balance: ledger_total(&opening_entries),
            closing_balance: None,
            shift_drop: None,
            entries: opening_entries.clone(),
            opening_entries,
            status: ShiftStatus::Open,
            sync_version: 1,
        };

        self.store.save(&record).await?;

        info!(
            shift_id = %record.id,
            drawer = %record.drawer_number,
            cashier = %record.cashier_name,
            opening_balance = %record.opening_balance,
            "Shift started"
        );

        Ok(record)
    }

    /// Sets one line of the live count and persists it immediately.
    ///
    /// `quantity == 0` removes the line. The opening balance never changes.
    pub async fn update_live_entry(
        &self,
        shift: &ShiftRecord,
        kind: CashKind,
        denomination: Money,
        quantity: i64,
    ) -> ServiceResult<ShiftRecord> {
        ensure_open(shift, "update entries")?;
        let entries = upsert(&shift.entries, kind, denomination, quantity)?;

        let next = ShiftRecord {
            entries,
            sync_version: shift.sync_version + 1,
            ..shift.clone()
        };
        self.store.save(&next).await?;

        debug!(
            shift_id = %next.id,
            kind = %kind,
            denomination = %denomination,
            quantity,
            current_balance = %next.current_balance(),
            "Live entry updated"
        );

        Ok(next)
    }

    /// Adds a receipt to the live count.
    pub async fn add_receipt(&self, shift: &ShiftRecord, amount: Money) -> ServiceResult<ShiftRecord> {
        self.update_live_entry(shift, CashKind::Receipt, amount, 1).await
    }

    /// Removes the receipt of `amount` from the live count.
    pub async fn remove_receipt(&self, shift: &ShiftRecord, amount: Money) -> ServiceResult<ShiftRecord> {
        self.update_live_entry(shift, CashKind::Receipt, amount, 0).await
    }

    /// Closes the shift with the live count as its closing count.
    ///
    /// The shift report goes to the sink after the close is persisted; a
    /// sink failure is logged and does not undo the close.
    pub async fn end_shift(&self, shift: &ShiftRecord, shift_drop: Money) -> ServiceResult<ClosedShift> {
        let preview = preview_close(shift)?;
        validate_shift_drop(shift_drop)?;

        let next = ShiftRecord {
            close_time: Some(Utc::now()),
            closing_balance: Some(preview.current_balance),
            shift_drop: Some(shift_drop),
            status: ShiftStatus::Closed,
            sync_version: shift.sync_version + 1,
            ..shift.clone()
        };
        self.store.save(&next).await?;

        info!(
            shift_id = %next.id,
            drawer = %next.drawer_number,
            closing_balance = %preview.current_balance,
            difference = %preview.difference.signed_display(),
            shift_drop = %shift_drop,
            "Shift ended"
        );

        if let Some(sink) = &self.reports {
            let report = ShiftReport::from_shift(&next);
            if let Err(e) = sink.shift_closed(&report).await {
                warn!(shift_id = %next.id, error = %e, "Shift report could not be delivered");
            }
        }

        Ok(ClosedShift {
            record: next,
            difference: preview.difference,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Reloads one shift from the store.
    pub async fn get_shift(&self, id: &str) -> ServiceResult<ShiftRecord> {
        validate_shift_id(id)?;
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ShiftNotFound(id.to_string()).into())
    }

    /// All shifts, newest first, split into active and closed.
    pub async fn load_shifts(&self) -> ServiceResult<ShiftBoard> {
        let shifts = self.store.get_all().await?;
        Ok(ShiftBoard::partition(shifts))
    }

    /// Deletes every closed shift. Open shifts are kept.
    pub async fn clear_history(&self) -> ServiceResult<u64> {
        let deleted = self.store.delete_where_status(ShiftStatus::Closed).await?;
        info!(deleted, "Shift history cleared");
        Ok(deleted)
    }

    /// Builds the history report over all closed shifts and hands it to the
    /// sink, if any.
    pub async fn history_report(&self) -> ServiceResult<HistoryReport> {
        let closed = self.store.get_by_status(ShiftStatus::Closed).await?;
        let report = HistoryReport::from_shifts(&closed);

        if let Some(sink) = &self.reports {
            if let Err(e) = sink.history_exported(&report).await {
                warn!(shifts = closed.len(), error = %e, "History report could not be delivered");
            }
        }

        Ok(report)
    }

    // =========================================================================
    // Organization
    // =========================================================================

    /// Stores the organization name; blank clears it.
    pub async fn set_organization(&self, name: &str) -> ServiceResult<String> {
        let name = normalize_organization_name(Some(name))?.unwrap_or_default();
        self.store.save_organization(&name).await?;
        info!(organization = %name, "Organization saved");
        Ok(name)
    }

    /// The stored organization name; empty when never set.
    pub async fn organization(&self) -> ServiceResult<String> {
        Ok(self.store.get_organization().await?)
    }

    async fn fallback_organization(&self) -> ServiceResult<Option<String>> {
        let stored = self.store.get_organization().await?;
        if !stored.trim().is_empty() {
            return Ok(Some(stored));
        }
        Ok(self.default_organization.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
