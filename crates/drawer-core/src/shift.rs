//! # Shift Helpers
//!
//! Pure pieces of the shift lifecycle that need no storage: lookup,
//! the pre-close confirmation figures, and the active/closed split the
//! drawer screen shows.
//!
//! ## Close Confirmation
//! ```text
//! Opening Balance: $40.00
//! Current Balance: $41.00
//! Difference:      +$1.00
//!
//! Are you sure you want to end this shift?
//! ```
//! [`preview_close`] computes those three figures without touching the
//! record, so the UI can ask before `end_shift` commits anything.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ShiftRecord, ShiftStatus};

/// Finds a shift by id in an already loaded list.
pub fn select_shift<'a>(shifts: &'a [ShiftRecord], id: &str) -> CoreResult<&'a ShiftRecord> {
    shifts
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| CoreError::ShiftNotFound(id.to_string()))
}

/// Figures shown to the cashier before a shift is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClosePreview {
    pub opening_balance: Money,
    pub current_balance: Money,
    /// `current_balance - opening_balance`; any sign is acceptable.
    pub difference: Money,
}

/// Computes the close confirmation figures for an open shift.
pub fn preview_close(shift: &ShiftRecord) -> CoreResult<ClosePreview> {
    ensure_open(shift, "end shift")?;

    let current_balance = shift.current_balance();
    Ok(ClosePreview {
        opening_balance: shift.opening_balance,
        current_balance,
        difference: current_balance - shift.opening_balance,
    })
}

/// Rejects operations on a shift that is no longer open.
pub fn ensure_open(shift: &ShiftRecord, operation: &'static str) -> CoreResult<()> {
    if shift.status != ShiftStatus::Open {
        return Err(CoreError::InvalidShiftStatus {
            shift_id: shift.id.clone(),
            current_status: shift.status,
            operation,
        });
    }
    Ok(())
}

/// Shifts split the way the drawer screen lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShiftBoard {
    /// Open shifts, in listing order.
    pub active: Vec<ShiftRecord>,
    /// Closed shifts, in listing order.
    pub closed: Vec<ShiftRecord>,
}

impl ShiftBoard {
    /// Splits a listing by status, keeping its order.
    pub fn partition(shifts: Vec<ShiftRecord>) -> Self {
        let (active, closed) = shifts.into_iter().partition(ShiftRecord::is_open);
        ShiftBoard { active, closed }
    }

    /// The shift the screen selects when nothing else is: the first active one.
    pub fn default_selection(&self) -> Option<&ShiftRecord> {
        self.active.first()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
