//! # Report Documents
//!
//! Rendering-agnostic shift and history reports.
//!
//! The PDF engine lives outside this workspace. What lives here is the
//! content of a report: which lines appear, in which order, with which
//! figures. A renderer turns a [`ShiftReport`] into pixels; [`fmt::Display`]
//! turns it into plain text.
//!
//! ## Shift Report Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Corner Store                                   │
//! │                          Shift Report                                   │
//! │                                                                         │
//! │  Drawer Number: 5                                                       │
//! │  Cashier: Dana                                                          │
//! │  Open Time: Mar 3, 2026, 9:00:00 AM                                     │
//! │  Close Time: Mar 3, 2026, 5:00:00 PM                                    │
//! │                                                                         │
//! │  Opening Balance: $40.00                                                │
//! │  Closing Balance: $41.00                                                │
//! │  Balance Difference: +$1.00                                             │
//! │  Shift Drop: $10.00                                                     │
//! │                                                                         │
//! │  Type      Denomination   Quantity      Total                           │
//! │  Bill            $20.00          2     $40.00                           │
//! │  Coin             $0.25          4      $1.00                           │
//! │  Grand Total                           $41.00                           │
//! │                                                                         │
//! │  Opening vs. Closing                                                    │
//! │  Type      Denomination  Open Qty  Open Total Close Qty Close Total     │
//! │  Bill            $20.00         2      $40.00         2      $40.00     │
//! │  Coin             $0.25         0       $0.00         4       $1.00     │
//! │  Total                                 $40.00                $41.00     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use ts_rs::TS;

use crate::ledger::ledger_total;
use crate::money::Money;
use crate::summary::{summarize, Reconciliation};
use crate::types::{CashKind, ShiftRecord};

/// Title used when a shift has no organization name.
pub const UNNAMED_ORGANIZATION: &str = "N/A";

/// Formats a timestamp the way reports print it: `Mar 3, 2026, 5:00:00 PM`.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %-I:%M:%S %p").to_string()
}

/// One row of the entry table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    pub kind: CashKind,
    pub denomination: Money,
    pub quantity: i64,
    pub total: Money,
}

/// Everything a single-shift report shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShiftReport {
    pub shift_id: String,
    /// Organization name, or `N/A`.
    pub title: String,
    pub drawer_number: String,
    pub cashier_name: String,
    #[ts(as = "String")]
    pub open_time: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub close_time: Option<DateTime<Utc>>,
    pub opening_balance: Money,
    pub closing_balance: Option<Money>,
    pub difference: Option<Money>,
    pub shift_drop: Option<Money>,
    /// The shift's current entries (closing count once closed), entry order.
    pub lines: Vec<ReportLine>,
    pub grand_total: Money,
    /// Opening vs. closing per denomination.
    pub reconciliation: Reconciliation,
}

impl ShiftReport {
    /// Builds the report for one shift, open or closed.
    pub fn from_shift(shift: &ShiftRecord) -> Self {
        let lines = shift
            .entries
            .iter()
            .map(|e| ReportLine {
                kind: e.kind,
                denomination: e.denomination,
                quantity: e.quantity,
                total: e.total,
            })
            .collect();

        ShiftReport {
            shift_id: shift.id.clone(),
            title: shift
                .organization_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNNAMED_ORGANIZATION.to_string()),
            drawer_number: shift.drawer_number.clone(),
            cashier_name: shift.cashier_name.clone(),
            open_time: shift.open_time,
            close_time: shift.close_time,
            opening_balance: shift.opening_balance,
            closing_balance: shift.closing_balance,
            difference: shift.difference(),
            shift_drop: shift.shift_drop,
            lines,
            grand_total: ledger_total(&shift.entries),
            reconciliation: summarize(shift),
        }
    }

    /// Renders the report as text, formatting amounts with `amount`.
    pub fn render_with(&self, amount: &dyn Fn(Money) -> String) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_body(&mut out, amount);
        out
    }

    fn write_body(&self, out: &mut String, amount: &dyn Fn(Money) -> String) -> fmt::Result {
        writeln!(out, "{}", self.title)?;
        writeln!(out, "Shift Report")?;
        writeln!(out)?;
        writeln!(out, "Drawer Number: {}", self.drawer_number)?;
        writeln!(out, "Cashier: {}", self.cashier_name)?;
        writeln!(out, "Open Time: {}", format_timestamp(&self.open_time))?;
        if let Some(close_time) = &self.close_time {
            writeln!(out, "Close Time: {}", format_timestamp(close_time))?;
        }
        writeln!(out)?;
        writeln!(out, "Opening Balance: {}", amount(self.opening_balance))?;
        if let Some(closing) = self.closing_balance {
            writeln!(out, "Closing Balance: {}", amount(closing))?;
        }
        if let Some(difference) = self.difference {
            writeln!(out, "Balance Difference: {}", signed(difference, amount))?;
        }
        if let Some(drop) = self.shift_drop {
            writeln!(out, "Shift Drop: {}", amount(drop))?;
        }
        writeln!(out)?;
        write_table(out, &self.lines, amount)?;
        writeln!(out, "{:<41}{:>12}", "Grand Total", amount(self.grand_total))?;

        // Only a closed shift has a closing side to compare.
        if self.close_time.is_some() {
            writeln!(out)?;
            writeln!(out, "Opening vs. Closing")?;
            write_reconciliation(out, &self.reconciliation, amount)?;
        }
        Ok(())
    }
}

impl fmt::Display for ShiftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&|m: Money| m.to_string()))
    }
}

/// All shifts in one document, numbered in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub title: String,
    pub shifts: Vec<ShiftReport>,
}

impl HistoryReport {
    pub const TITLE: &'static str = "Complete Shift History Report";

    pub fn from_shifts(shifts: &[ShiftRecord]) -> Self {
        HistoryReport {
            title: Self::TITLE.to_string(),
            shifts: shifts.iter().map(ShiftReport::from_shift).collect(),
        }
    }

    /// Renders the history as text, formatting amounts with `amount`.
    pub fn render_with(&self, amount: &dyn Fn(Money) -> String) -> String {
        let mut out = String::new();
        let _ = self.write_body(&mut out, amount);
        out
    }

    fn write_body(&self, out: &mut String, amount: &dyn Fn(Money) -> String) -> fmt::Result {
        writeln!(out, "{}", self.title)?;

        for (index, shift) in self.shifts.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "Shift #{} - {}", index + 1, shift.title)?;
            writeln!(
                out,
                "Drawer: {} | Cashier: {}",
                shift.drawer_number, shift.cashier_name
            )?;
            writeln!(out, "Opened: {}", format_timestamp(&shift.open_time))?;
            if let Some(close_time) = &shift.close_time {
                writeln!(out, "Closed: {}", format_timestamp(close_time))?;
            }
            write_table(out, &shift.lines, amount)?;
            writeln!(out, "{:<41}{:>12}", "Opening Balance", amount(shift.opening_balance))?;
            if let Some(closing) = shift.closing_balance {
                writeln!(out, "{:<41}{:>12}", "Closing Balance", amount(closing))?;
            }
            if let Some(difference) = shift.difference {
                writeln!(out, "{:<41}{:>12}", "Difference", signed(difference, amount))?;
            }
            if let Some(drop) = shift.shift_drop {
                writeln!(out, "{:<41}{:>12}", "Shift Drop", amount(drop))?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for HistoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&|m: Money| m.to_string()))
    }
}

fn signed(value: Money, amount: &dyn Fn(Money) -> String) -> String {
    let sign = if value.is_negative() { "-" } else { "+" };
    format!("{}{}", sign, amount(value.abs()))
}

fn write_table(out: &mut String, lines: &[ReportLine], amount: &dyn Fn(Money) -> String) -> fmt::Result {
    writeln!(out, "{:<10}{:>15}{:>16}{:>12}", "Type", "Denomination", "Quantity", "Total")?;
    for line in lines {
        writeln!(
            out,
            "{:<10}{:>15}{:>16}{:>12}",
            line.kind.to_string(),
            amount(line.denomination),
            line.quantity,
            amount(line.total)
        )?;
    }
    Ok(())
}

fn write_reconciliation(
    out: &mut String,
    reconciliation: &Reconciliation,
    amount: &dyn Fn(Money) -> String,
) -> fmt::Result {
    writeln!(
        out,
        "{:<10}{:>12}{:>10}{:>12}{:>10}{:>12}",
        "Type", "Denomination", "Open Qty", "Open Total", "Close Qty", "Close Total"
    )?;
    for row in &reconciliation.rows {
        writeln!(
            out,
            "{:<10}{:>12}{:>10}{:>12}{:>10}{:>12}",
            row.kind.to_string(),
            amount(row.denomination),
            row.opening_qty,
            amount(row.opening_total),
            row.closing_qty,
            amount(row.closing_total)
        )?;
    }
    writeln!(
        out,
        "{:<32}{:>12}{:>22}",
        "Total",
        amount(reconciliation.opening_total),
        amount(reconciliation.closing_total)
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
