//! # CashEntry Ledger
//!
//! Maintains the set of denomination/quantity lines for one drawer count.
//!
//! ## Ledger Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    upsert(kind, denomination, quantity)                 │
//! │                                                                         │
//! │  Cashier types "3" next to $20 bills                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate: denomination > 0, 0 ≤ quantity ≤ MAX_ENTRY_QUANTITY          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find (Bill, $20) ──┬── found,  qty > 0 ──► replace in place            │
//! │                     ├── found,  qty = 0 ──► remove                      │
//! │                     ├── absent, qty > 0 ──► append                      │
//! │                     └── absent, qty = 0 ──► no-op                       │
//! │                                                                         │
//! │  INVARIANTS after every call:                                           │
//! │  • one entry per (kind, denomination)                                   │
//! │  • no zero-quantity entries                                             │
//! │  • total == denomination × quantity                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Insertion order is kept. It only matters for receipts, which are listed
//! in the order they were entered.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CashEntry, CashKind};
use crate::validation::{
    checked_entries_total, validate_denomination, validate_entry_set, validate_quantity,
    ValidationResult,
};

/// Sum of `total` over a set of entries.
///
/// Entry sets built by [`upsert`] or accepted by `validate_entry_set` always
/// fit; their sum never overflows.
pub fn ledger_total(entries: &[CashEntry]) -> Money {
    entries.iter().map(|e| e.total).sum()
}

/// Returns a new entry set with the `(kind, denomination)` line set to
/// `quantity`.
///
/// The input slice is not modified; the caller decides whether to keep and
/// persist the result.
///
/// ## Example
/// ```rust
/// use drawer_core::ledger::{ledger_total, upsert};
/// use drawer_core::{CashKind, Money};
///
/// let entries = upsert(&[], CashKind::Bill, Money::from_dollars(20), 2).unwrap();
/// let entries = upsert(&entries, CashKind::Coin, Money::from_cents(25), 4).unwrap();
/// assert_eq!(ledger_total(&entries), Money::from_dollars(41));
///
/// let entries = upsert(&entries, CashKind::Coin, Money::from_cents(25), 0).unwrap();
/// assert_eq!(entries.len(), 1);
/// ```
pub fn upsert(
    entries: &[CashEntry],
    kind: CashKind,
    denomination: Money,
    quantity: i64,
) -> ValidationResult<Vec<CashEntry>> {
    let mut next = entries.to_vec();
    apply(&mut next, kind, denomination, quantity)?;
    Ok(next)
}

/// In-place form of [`upsert`]; leaves `entries` untouched on error.
fn apply(
    entries: &mut Vec<CashEntry>,
    kind: CashKind,
    denomination: Money,
    quantity: i64,
) -> ValidationResult<()> {
    validate_denomination(denomination)?;
    validate_quantity(quantity)?;

    let existing = entries.iter().position(|e| e.matches(kind, denomination));

    if quantity == 0 {
        if let Some(index) = existing {
            entries.remove(index);
        }
        return Ok(());
    }

    let total = denomination
        .checked_multiply_quantity(quantity)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "denomination".to_string(),
            reason: format!("{} × {} is too large", denomination, quantity),
        })?;

    let entry = CashEntry {
        kind,
        denomination,
        quantity,
        total,
    };

    let others = entries
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != existing)
        .map(|(_, e)| e);
    checked_entries_total(others.chain(std::iter::once(&entry)))?;

    match existing {
        Some(index) => entries[index] = entry,
        None => entries.push(entry),
    }

    Ok(())
}

// =============================================================================
// Ledger
// =============================================================================

/// An entry set that upholds the ledger invariants.
///
/// The browser's opening-count form builds one of these before the shift
/// exists; the lifecycle manager uses the free [`upsert`] on records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<CashEntry>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Adopts an externally supplied entry set after checking it.
    pub fn from_entries(entries: Vec<CashEntry>) -> ValidationResult<Self> {
        validate_entry_set(&entries)?;
        Ok(Ledger { entries })
    }

    /// Sets the `(kind, denomination)` line to `quantity`.
    pub fn upsert(&mut self, kind: CashKind, denomination: Money, quantity: i64) -> ValidationResult<()> {
        apply(&mut self.entries, kind, denomination, quantity)
    }

    /// Adds a receipt of the given amount.
    ///
    /// Receipts are keyed by amount like any other entry, so adding a second
    /// receipt with the same amount replaces the first (quantity stays 1).
    pub fn add_receipt(&mut self, amount: Money) -> ValidationResult<()> {
        self.upsert(CashKind::Receipt, amount, 1)
    }

    /// Removes the receipt with the given amount, if present.
    pub fn remove_receipt(&mut self, amount: Money) -> ValidationResult<()> {
        self.upsert(CashKind::Receipt, amount, 0)
    }

    /// Pieces counted for a `(kind, denomination)` pair; zero when absent.
    pub fn quantity_of(&self, kind: CashKind, denomination: Money) -> i64 {
        self.entries
            .iter()
            .find(|e| e.matches(kind, denomination))
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    /// Entries of one kind, in insertion order.
    pub fn entries_of(&self, kind: CashKind) -> impl Iterator<Item = &CashEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Sum of all entry totals.
    pub fn total(&self) -> Money {
        ledger_total(&self.entries)
    }

    pub fn entries(&self) -> &[CashEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CashEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_DENOMINATION_CENTS, MAX_ENTRY_QUANTITY};

    fn bill(dollars: i64) -> Money {
        Money::from_dollars(dollars)
    }

    #[test]
    fn test_upsert_appends_new_entry() {
        let entries = upsert(&[], CashKind::Bill, bill(20), 2).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total, bill(40));
    }

    #[test]
    fn test_upsert_replaces_existing_in_place() {
        let entries = upsert(&[], CashKind::Bill, bill(20), 2).unwrap();
        let entries = upsert(&entries, CashKind::Coin, Money::from_cents(25), 4).unwrap();
        let entries = upsert(&entries, CashKind::Bill, bill(20), 5).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, CashKind::Bill);
        assert_eq!(entries[0].quantity, 5);
        assert_eq!(entries[0].total, bill(100));
    }

    #[test]
    fn test_same_denomination_different_kind_is_separate() {
        let entries = upsert(&[], CashKind::Bill, bill(1), 3).unwrap();
        let entries = upsert(&entries, CashKind::Coin, bill(1), 2).unwrap();
        let entries = upsert(&entries, CashKind::Roll, bill(1), 1).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(ledger_total(&entries), bill(6));
    }

    #[test]
    fn test_zero_quantity_removes_or_noops() {
        let entries = upsert(&[], CashKind::Bill, bill(10), 1).unwrap();

        let removed = upsert(&entries, CashKind::Bill, bill(10), 0).unwrap();
        assert!(removed.is_empty());

        let untouched = upsert(&entries, CashKind::Bill, bill(50), 0).unwrap();
        assert_eq!(untouched, entries);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let base = upsert(&[], CashKind::Roll, bill(10), 2).unwrap();

        let once = upsert(&base, CashKind::Coin, Money::from_cents(10), 7).unwrap();
        let twice = upsert(&once, CashKind::Coin, Money::from_cents(10), 7).unwrap();
        assert_eq!(once, twice);

        let once = upsert(&base, CashKind::Roll, bill(10), 0).unwrap();
        let twice = upsert(&once, CashKind::Roll, bill(10), 0).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_upsert_rejects_invalid_input() {
        let entries = upsert(&[], CashKind::Bill, bill(5), 1).unwrap();

        assert!(matches!(
            upsert(&entries, CashKind::Bill, bill(5), -1),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            upsert(&entries, CashKind::Bill, Money::zero(), 1),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(upsert(&entries, CashKind::Bill, Money::from_cents(i64::MAX), 2).is_err());
        assert!(matches!(
            upsert(&entries, CashKind::Bill, Money::from_cents(MAX_DENOMINATION_CENTS + 1), 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_huge_denominations_never_overflow_the_total() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        assert!(upsert(&[], CashKind::Bill, half, 1).is_err());
        assert!(upsert(&[], CashKind::Coin, half, 1).is_err());

        let mut entries = Vec::new();
        for kind in CashKind::ALL {
            let largest = Money::from_cents(MAX_DENOMINATION_CENTS);
            entries = upsert(&entries, kind, largest, MAX_ENTRY_QUANTITY).unwrap();
        }
        assert_eq!(
            ledger_total(&entries).cents(),
            4 * MAX_DENOMINATION_CENTS * MAX_ENTRY_QUANTITY
        );
    }

    #[test]
    fn test_overflowing_entry_set_is_rejected() {
        let huge = |cents: i64| CashEntry {
            kind: CashKind::Bill,
            denomination: Money::from_cents(cents),
            quantity: 1,
            total: Money::from_cents(cents),
        };
        let entries = vec![huge(i64::MAX / 2 + 1), huge(i64::MAX / 2 + 2)];

        assert!(matches!(
            crate::validation::checked_entries_total(&entries),
            Err(ValidationError::TotalTooLarge { .. })
        ));
        assert!(Ledger::from_entries(entries).is_err());
    }

    #[test]
    fn test_total_matches_denomination_times_quantity() {
        let mut ledger = Ledger::new();
        for (kind, cents, qty) in [
            (CashKind::Bill, 10000, 3),
            (CashKind::Bill, 100, 17),
            (CashKind::Coin, 10, 33),
            (CashKind::Coin, 1, 99),
            (CashKind::Roll, 50, 4),
            (CashKind::Receipt, 1299, 1),
        ] {
            ledger.upsert(kind, Money::from_cents(cents), qty).unwrap();
        }

        let expected: i64 = ledger
            .entries()
            .iter()
            .map(|e| e.denomination.cents() * e.quantity)
            .sum();
        assert_eq!(ledger.total().cents(), expected);
        assert_eq!(ledger.total().cents(), 30000 + 1700 + 330 + 99 + 200 + 1299);
    }

    #[test]
    fn test_failed_upsert_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new();
        ledger.upsert(CashKind::Bill, bill(20), 2).unwrap();
        let before = ledger.clone();

        assert!(ledger.upsert(CashKind::Bill, bill(20), -4).is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_receipts_keep_entry_order() {
        let mut ledger = Ledger::new();
        ledger.add_receipt(Money::from_cents(1250)).unwrap();
        ledger.upsert(CashKind::Bill, bill(5), 1).unwrap();
        ledger.add_receipt(Money::from_cents(300)).unwrap();
        ledger.add_receipt(Money::from_cents(4999)).unwrap();
        ledger.remove_receipt(Money::from_cents(300)).unwrap();

        let receipts: Vec<i64> = ledger
            .entries_of(CashKind::Receipt)
            .map(|e| e.denomination.cents())
            .collect();
        assert_eq!(receipts, vec![1250, 4999]);
        assert_eq!(ledger.quantity_of(CashKind::Receipt, Money::from_cents(300)), 0);
    }

    #[test]
    fn test_from_entries_validates() {
        let entries = upsert(&[], CashKind::Coin, Money::from_cents(5), 20).unwrap();
        assert!(Ledger::from_entries(entries.clone()).is_ok());

        let mut doubled = entries.clone();
        doubled.extend(entries);
        assert!(Ledger::from_entries(doubled).is_err());
    }
}
