//! # Reconciliation Summarizer
//!
//! Compares a shift's opening count with its closing count, line by line.
//!
//! ```text
//!   opening_entries            closing_entries()
//!   ───────────────            ─────────────────
//!   Bill $20 × 2               Bill $20 × 1
//!   Bill $10 × 3               Coin $0.25 × 4
//!          │                          │
//!          └──────────┬───────────────┘
//!                     ▼
//!   kind     denom   open qty  open total  close qty  close total
//!   Bill     $20.00      2        $40.00        1        $20.00
//!   Bill     $10.00      3        $30.00        0         $0.00
//!   Coin      $0.25      0         $0.00        4         $1.00
//! ```
//!
//! Rows are ordered bills, rolls, coins, receipts, and within a kind by
//! descending denomination. The function is pure and can be called any
//! number of times on the same shift.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CashEntry, CashKind, ShiftRecord};

/// One `(kind, denomination)` line of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationRow {
    pub kind: CashKind,
    pub denomination: Money,
    pub opening_qty: i64,
    pub opening_total: Money,
    pub closing_qty: i64,
    pub closing_total: Money,
}

impl ReconciliationRow {
    fn empty(kind: CashKind, denomination: Money) -> Self {
        ReconciliationRow {
            kind,
            denomination,
            opening_qty: 0,
            opening_total: Money::zero(),
            closing_qty: 0,
            closing_total: Money::zero(),
        }
    }

    /// Closing total minus opening total for this line.
    pub fn change(&self) -> Money {
        self.closing_total - self.opening_total
    }
}

/// The full comparison plus its aggregate totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub rows: Vec<ReconciliationRow>,
    /// Equals the shift's `opening_balance`.
    pub opening_total: Money,
    /// Equals the shift's `closing_balance`; zero while the shift is open.
    pub closing_total: Money,
}

/// Builds the opening-vs-closing comparison for a shift.
///
/// While the shift is open there is no closing snapshot yet, so every
/// closing column is zero.
pub fn summarize(shift: &ShiftRecord) -> Reconciliation {
    let closing = shift.closing_entries().unwrap_or(&[]);
    reconcile(&shift.opening_entries, closing)
}

/// Compares two arbitrary entry sets.
pub fn reconcile(opening: &[CashEntry], closing: &[CashEntry]) -> Reconciliation {
    let mut rows: Vec<ReconciliationRow> = Vec::new();

    fn row_for<'a>(
        rows: &'a mut Vec<ReconciliationRow>,
        kind: CashKind,
        denomination: Money,
    ) -> &'a mut ReconciliationRow {
        let index = match rows
            .iter()
            .position(|r| r.kind == kind && r.denomination == denomination)
        {
            Some(index) => index,
            None => {
                rows.push(ReconciliationRow::empty(kind, denomination));
                rows.len() - 1
            }
        };
        &mut rows[index]
    }

    for entry in opening {
        let row = row_for(&mut rows, entry.kind, entry.denomination);
        row.opening_qty += entry.quantity;
        row.opening_total += entry.total;
    }

    for entry in closing {
        let row = row_for(&mut rows, entry.kind, entry.denomination);
        row.closing_qty += entry.quantity;
        row.closing_total += entry.total;
    }

    rows.sort_by(|a, b| {
        a.kind
            .report_rank()
            .cmp(&b.kind.report_rank())
            .then_with(|| b.denomination.cmp(&a.denomination))
    });

    let opening_total = rows.iter().map(|r| r.opening_total).sum();
    let closing_total = rows.iter().map(|r| r.closing_total).sum();

    Reconciliation {
        rows,
        opening_total,
        closing_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
