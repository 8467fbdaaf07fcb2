//! # Domain Types
//!
//! Core domain types used throughout the cash drawer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────┐                 │
//! │  │    ShiftRecord      │        │     CashEntry       │                 │
//! │  │  ─────────────────  │  1..n  │  ─────────────────  │                 │
//! │  │  id (UUID)          │───────►│  kind               │                 │
//! │  │  drawer_number      │        │  denomination       │                 │
//! │  │  opening_entries    │        │  quantity           │                 │
//! │  │  entries (live)     │        │  total              │                 │
//! │  │  status             │        └─────────────────────┘                 │
//! │  └─────────────────────┘                                                │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    CashKind     │   │   ShiftStatus   │                              │
//! │  │  Bill  Coin     │   │   Open          │                              │
//! │  │  Roll  Receipt  │   │   Closed        │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Snapshots Per Shift
//! `opening_entries` is frozen when the shift starts. `entries` is the live
//! count while the shift is open and becomes the closing snapshot once it is
//! closed. Nothing has to be reconstructed from markers on individual entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Cash Kind
// =============================================================================

/// What a counted item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CashKind {
    /// Paper currency.
    Bill,
    /// Loose coins.
    Coin,
    /// Wrapped coin rolls, counted by roll face value.
    Roll,
    /// A receipt kept in the drawer; denomination is the receipt amount.
    Receipt,
}

impl CashKind {
    /// All kinds in report order.
    pub const ALL: [CashKind; 4] = [CashKind::Bill, CashKind::Roll, CashKind::Coin, CashKind::Receipt];

    /// Position in reports: bills, then rolls, then coins, then receipts.
    pub const fn report_rank(&self) -> u8 {
        match self {
            CashKind::Bill => 0,
            CashKind::Roll => 1,
            CashKind::Coin => 2,
            CashKind::Receipt => 3,
        }
    }

    /// The denominations the counting form offers for this kind.
    ///
    /// Receipts are free-form amounts, so the list is empty.
    pub fn standard_denominations(&self) -> &'static [Money] {
        match self {
            CashKind::Bill => &BILL_DENOMINATIONS,
            CashKind::Coin => &COIN_DENOMINATIONS,
            CashKind::Roll => &ROLL_DENOMINATIONS,
            CashKind::Receipt => &[],
        }
    }
}

impl fmt::Display for CashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CashKind::Bill => "Bill",
            CashKind::Coin => "Coin",
            CashKind::Roll => "Roll",
            CashKind::Receipt => "Receipt",
        };
        f.write_str(label)
    }
}

/// Bill face values, largest first.
pub const BILL_DENOMINATIONS: [Money; 6] = [
    Money::from_cents(10000),
    Money::from_cents(5000),
    Money::from_cents(2000),
    Money::from_cents(1000),
    Money::from_cents(500),
    Money::from_cents(100),
];

/// Coin face values, largest first.
pub const COIN_DENOMINATIONS: [Money; 5] = [
    Money::from_cents(100),
    Money::from_cents(25),
    Money::from_cents(10),
    Money::from_cents(5),
    Money::from_cents(1),
];

/// Coin roll values (dollar value of a full roll), largest first.
pub const ROLL_DENOMINATIONS: [Money; 5] = [
    Money::from_cents(1000),
    Money::from_cents(500),
    Money::from_cents(200),
    Money::from_cents(100),
    Money::from_cents(50),
];

// =============================================================================
// Cash Entry
// =============================================================================

/// One counted line: `quantity` pieces of `kind` at `denomination` each.
///
/// ## Invariants
/// - `total == denomination × quantity`
/// - `quantity > 0` for any entry stored in a ledger
///
/// Build entries through [`crate::ledger::upsert`] or
/// [`crate::validation::validate_entry`]; the fields stay public so the UI
/// layer can deserialize them, and ledgers re-check them on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CashEntry {
    pub kind: CashKind,
    pub denomination: Money,
    pub quantity: i64,
    pub total: Money,
}

impl CashEntry {
    /// Whether this entry counts the given `(kind, denomination)` pair.
    #[inline]
    pub fn matches(&self, kind: CashKind, denomination: Money) -> bool {
        self.kind == kind && self.denomination == denomination
    }
}

// =============================================================================
// Shift Status
// =============================================================================

/// Where a shift is in its lifecycle. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Cashier is working the drawer; counts may change.
    Open,
    /// Shift ended; balances are final.
    Closed,
}

impl ShiftStatus {
    /// The lowercase name used in storage and JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Open => "open",
            ShiftStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Shift Record
// =============================================================================

/// A single cashier's tenure at a drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Organization printed on reports.
    pub organization_name: Option<String>,

    /// Drawer this shift runs on. Unique among open shifts.
    pub drawer_number: String,

    pub cashier_name: String,

    #[ts(as = "String")]
    pub open_time: DateTime<Utc>,

    /// Set exactly once, when the shift closes.
    #[ts(as = "Option<String>")]
    pub close_time: Option<DateTime<Utc>>,

    /// Sum of `opening_entries`; frozen at start.
    pub opening_balance: Money,

    /// Sum of `entries` at the moment the shift closed.
    pub closing_balance: Option<Money>,

    /// Cash pulled from the drawer for safekeeping. Recorded only; it is not
    /// subtracted from `closing_balance`.
    pub shift_drop: Option<Money>,

    /// Count recorded when the shift started.
    pub opening_entries: Vec<CashEntry>,

    /// Live count while open; the closing count once closed.
    pub entries: Vec<CashEntry>,

    pub status: ShiftStatus,

    /// Incremented on every persisted write; stale writes are rejected.
    pub sync_version: i64,
}

impl ShiftRecord {
    /// Checks if the shift still accepts edits.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == ShiftStatus::Open
    }

    /// Sum of the live entries.
    pub fn current_balance(&self) -> Money {
        crate::ledger::ledger_total(&self.entries)
    }

    /// The closing snapshot; `None` while the shift is open.
    pub fn closing_entries(&self) -> Option<&[CashEntry]> {
        match self.status {
            ShiftStatus::Closed => Some(&self.entries),
            ShiftStatus::Open => None,
        }
    }

    /// Closing minus opening balance, once closed.
    pub fn difference(&self) -> Option<Money> {
        self.closing_balance.map(|closing| closing - self.opening_balance)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::upsert;

    fn sample_shift() -> ShiftRecord {
        let opening = upsert(&[], CashKind::Bill, Money::from_dollars(20), 2).unwrap();
        ShiftRecord {
            id: "shift-1".to_string(),
            organization_name: None,
            drawer_number: "1".to_string(),
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

    #[test]
    fn test_report_rank_order() {
        let mut kinds = vec![CashKind::Receipt, CashKind::Coin, CashKind::Bill, CashKind::Roll];
        kinds.sort_by_key(|k| k.report_rank());
        assert_eq!(kinds, CashKind::ALL.to_vec());
    }

    #[test]
    fn test_standard_denominations() {
        assert_eq!(CashKind::Bill.standard_denominations().len(), 6);
        assert_eq!(CashKind::Coin.standard_denominations()[1], Money::from_cents(25));
        assert_eq!(CashKind::Roll.standard_denominations()[4], Money::from_cents(50));
        assert!(CashKind::Receipt.standard_denominations().is_empty());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(ShiftStatus::Open.to_string(), "open");
        assert_eq!(
            serde_json::to_string(&ShiftStatus::Closed).unwrap(),
            "\"closed\""
        );
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = CashEntry {
            kind: CashKind::Coin,
            denomination: Money::from_cents(25),
            quantity: 4,
            total: Money::from_cents(100),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "coin", "denomination": 25, "quantity": 4, "total": 100})
        );
    }

    #[test]
    fn test_closing_entries_only_when_closed() {
        let mut shift = sample_shift();
        assert!(shift.closing_entries().is_none());
        assert_eq!(shift.difference(), None);
        assert_eq!(shift.current_balance(), Money::from_dollars(40));

        shift.status = ShiftStatus::Closed;
        shift.closing_balance = Some(Money::from_dollars(41));
        assert_eq!(shift.closing_entries().map(|e| e.len()), Some(1));
        assert_eq!(shift.difference(), Some(Money::from_dollars(1)));
    }
}
