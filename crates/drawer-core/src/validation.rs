//! # Validation Module
//!
//! Input validation for cash counts and shift fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                  │
//! │  ├── Immediate feedback while typing                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: drawer-core (THIS MODULE)                                     │
//! │  ├── Text → exact cents, text → piece counts                            │
//! │  └── Required fields, ranges, entry invariants                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                        │
//! │  ├── NOT NULL / CHECK constraints                                       │
//! │  └── One open shift per drawer (partial UNIQUE index)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use drawer_core::validation::{parse_amount, parse_quantity};
//!
//! assert_eq!(parse_amount("denomination", "0.25").unwrap().cents(), 25);
//! assert_eq!(parse_quantity("7").unwrap(), 7);
//! assert!(parse_quantity("seven").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{Money, ParseMoneyError};
use crate::types::{CashEntry, CashKind};
use crate::{MAX_DENOMINATION_CENTS, MAX_ENTRY_QUANTITY, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, bounded text field and returns it trimmed.
fn validate_required_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(value.to_string())
}

/// Validates a drawer number.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_NAME_LEN` characters
///
/// Drawer numbers are labels, not integers: `"5"`, `"A-2"` and `"Front"` are
/// all valid.
pub fn validate_drawer_number(drawer_number: &str) -> ValidationResult<String> {
    validate_required_text("drawer number", drawer_number)
}

/// Validates a cashier name.
pub fn validate_cashier_name(name: &str) -> ValidationResult<String> {
    validate_required_text("cashier name", name)
}

/// Normalizes an optional organization name: blank becomes `None`.
pub fn normalize_organization_name(name: Option<&str>) -> ValidationResult<Option<String>> {
    match name.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => validate_required_text("organization name", name).map(Some),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a denomination.
///
/// ## Rules
/// - Strictly positive
/// - At most `MAX_DENOMINATION_CENTS`
pub fn validate_denomination(denomination: Money) -> ValidationResult<()> {
    if !denomination.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "denomination".to_string(),
        });
    }

    if denomination.cents() > MAX_DENOMINATION_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "denomination".to_string(),
            min: 1,
            max: MAX_DENOMINATION_CENTS,
        });
    }

    Ok(())
}

/// Validates a piece count.
///
/// ## Rules
/// - Zero is allowed (it means "remove this line")
/// - Negative counts are rejected
/// - At most `MAX_ENTRY_QUANTITY`, which keeps `denomination × quantity`
///   far away from overflow
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ENTRY_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ENTRY_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a shift drop amount: zero or more.
pub fn validate_shift_drop(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: "shift drop".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Text Input Parsers
// =============================================================================

/// Parses a typed amount into exact cents.
///
/// Unreadable input is an error, never zero.
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<Money> {
    input.parse::<Money>().map_err(|err| match err {
        ParseMoneyError::Empty => ValidationError::Required {
            field: field.to_string(),
        },
        other => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: other.to_string(),
        },
    })
}

/// Parses a typed piece count.
///
/// An empty field means zero pieces (the counting form starts blank).
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }

    let quantity: i64 = input.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: format!("'{}' is not a whole number", input),
    })?;

    validate_quantity(quantity)?;
    Ok(quantity)
}

// =============================================================================
// Entry Validators
// =============================================================================

/// Checks a stored entry: positive denomination, in-range positive quantity,
/// and a total that equals `denomination × quantity`.
pub fn validate_entry(entry: &CashEntry) -> ValidationResult<()> {
    validate_denomination(entry.denomination)?;
    validate_quantity(entry.quantity)?;

    if entry.quantity == 0 {
        return Err(ValidationError::ZeroQuantity {
            kind: entry.kind.to_string(),
            denomination: entry.denomination.to_string(),
        });
    }

    if entry.denomination.checked_multiply_quantity(entry.quantity) != Some(entry.total) {
        return Err(ValidationError::InconsistentTotal {
            kind: entry.kind.to_string(),
            denomination: entry.denomination.to_string(),
            quantity: entry.quantity,
            total: entry.total.to_string(),
        });
    }

    Ok(())
}

/// Sum of entry totals, or `TotalTooLarge` when it would overflow.
pub fn checked_entries_total<'a>(
    entries: impl IntoIterator<Item = &'a CashEntry>,
) -> ValidationResult<Money> {
    entries
        .into_iter()
        .try_fold(Money::zero(), |sum, entry| sum.checked_add(entry.total))
        .ok_or_else(|| ValidationError::TotalTooLarge {
            field: "cash count".to_string(),
        })
}

/// Checks a whole entry set: every entry valid, no duplicate pairs, and a
/// total that fits in `Money`.
pub fn validate_entry_set(entries: &[CashEntry]) -> ValidationResult<()> {
    checked_entries_total(entries)?;

    let mut seen: Vec<(CashKind, Money)> = Vec::with_capacity(entries.len());

    for entry in entries {
        validate_entry(entry)?;

        let key = (entry.kind, entry.denomination);
        if seen.contains(&key) {
            return Err(ValidationError::DuplicateEntry {
                kind: entry.kind.to_string(),
                denomination: entry.denomination.to_string(),
            });
        }
        seen.push(key);
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a shift id string format.
pub fn validate_shift_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: CashKind, cents: i64, quantity: i64) -> CashEntry {
        CashEntry {
            kind,
            denomination: Money::from_cents(cents),
            quantity,
            total: Money::from_cents(cents * quantity),
        }
    }

    #[test]
    fn test_validate_names() {
        assert_eq!(validate_drawer_number(" 5 ").unwrap(), "5");
        assert!(validate_drawer_number("").is_err());
        assert!(validate_drawer_number("   ").is_err());
        assert!(validate_cashier_name("Dana").is_ok());
        assert!(validate_cashier_name(&"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_normalize_organization_name() {
        assert_eq!(normalize_organization_name(None).unwrap(), None);
        assert_eq!(normalize_organization_name(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_organization_name(Some(" Corner Store ")).unwrap(),
            Some("Corner Store".to_string())
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(MAX_ENTRY_QUANTITY).is_ok());
        assert_eq!(
            validate_quantity(-1),
            Err(ValidationError::Negative {
                field: "quantity".to_string()
            })
        );
        assert!(validate_quantity(MAX_ENTRY_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_denomination() {
        assert!(validate_denomination(Money::from_cents(1)).is_ok());
        assert!(validate_denomination(Money::zero()).is_err());
        assert!(validate_denomination(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_parse_amount_never_coerces_to_zero() {
        assert_eq!(parse_amount("receipt", "12.40").unwrap(), Money::from_cents(1240));
        assert!(matches!(
            parse_amount("receipt", "12,40abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_amount("receipt", ""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("").unwrap(), 0);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("-2").is_err());
    }

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry(&entry(CashKind::Bill, 2000, 2)).is_ok());

        let mut bad_total = entry(CashKind::Bill, 2000, 2);
        bad_total.total = Money::from_cents(3999);
        assert!(matches!(
            validate_entry(&bad_total),
            Err(ValidationError::InconsistentTotal { .. })
        ));

        assert!(matches!(
            validate_entry(&entry(CashKind::Coin, 25, 0)),
            Err(ValidationError::ZeroQuantity { .. })
        ));
    }

    #[test]
    fn test_validate_entry_set_rejects_duplicates() {
        let entries = vec![entry(CashKind::Bill, 1000, 1), entry(CashKind::Coin, 1000, 1)];
        assert!(validate_entry_set(&entries).is_ok());

        let entries = vec![entry(CashKind::Bill, 1000, 1), entry(CashKind::Bill, 1000, 3)];
        assert!(matches!(
            validate_entry_set(&entries),
            Err(ValidationError::DuplicateEntry { .. })
        ));
    }

    #[test]
    fn test_validate_shift_id() {
        assert!(validate_shift_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_shift_id("").is_err());
        assert!(validate_shift_id("1712345678901").is_err());
    }
}
