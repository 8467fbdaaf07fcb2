//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Counting a drawer in floating point:                                   │
//! │    0.10 × 3 = 0.30000000000000004  ❌ WRONG!                            │
//! │                                                                         │
//! │  A drawer with 7 dimes and 3 pennies must total EXACTLY $0.73,          │
//! │  otherwise the closing variance shows phantom fractions of a cent.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 cents × 7 + 1 cent × 3 = 73 cents                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use drawer_core::money::Money;
//!
//! let quarter = Money::from_cents(25);
//! let roll: Money = "10.00".parse().unwrap();
//!
//! assert_eq!((quarter * 4).cents(), 100);
//! assert_eq!(roll.cents(), 1000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for shortages (closing below opening)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CashEntry.denomination × quantity ──► CashEntry.total                  │
/// │                                                                         │
/// │  Σ opening entries ──► ShiftRecord.opening_balance                      │
/// │  Σ live entries    ──► ShiftRecord.closing_balance (at close)           │
/// │                                                                         │
/// │  closing - opening ──► difference shown to the cashier                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use drawer_core::money::Money;
    ///
    /// let bill = Money::from_cents(2000); // Represents $20.00
    /// assert_eq!(bill.cents(), 2000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use drawer_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Creates a Money value from whole dollars.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a count of physical pieces.
    ///
    /// ## Example
    /// ```rust
    /// use drawer_core::money::Money;
    ///
    /// let twenty = Money::from_dollars(20);
    /// assert_eq!(twenty.multiply_quantity(2).cents(), 4000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Like [`Money::multiply_quantity`] but returns `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Addition that returns `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Formats the amount with an explicit sign, as used for variances.
    ///
    /// ## Example
    /// ```rust
    /// use drawer_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(100).signed_display(), "+$1.00");
    /// assert_eq!(Money::from_cents(-250).signed_display(), "-$2.50");
    /// assert_eq!(Money::zero().signed_display(), "+$0.00");
    /// ```
    pub fn signed_display(&self) -> String {
        if self.0 >= 0 {
            format!("+{}", self)
        } else {
            self.to_string()
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error returned when text cannot be read as an exact cent amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("'{0}' is too large")]
    Overflow(String),
}

/// Parses decimal text such as `"20"`, `"0.25"`, `"$1,234.50"` into exact cents.
///
/// ## Why Not `f64::from_str`?
/// `"0.29".parse::<f64>() * 100.0` is `28.999999999999996`. Parsing the
/// integer and fractional digits separately keeps every cent.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);
        let digits: String = unsigned.chars().filter(|c| *c != ',').collect();

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits.as_str(), ""),
        };

        let not_a_number = || ParseMoneyError::NotANumber(trimmed.to_string());

        if whole.is_empty() && frac.is_empty() {
            return Err(not_a_number());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(not_a_number());
        }
        if frac.len() > 2 {
            return Err(ParseMoneyError::TooPrecise(trimmed.to_string()));
        }

        let overflow = || ParseMoneyError::Overflow(trimmed.to_string());

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| not_a_number())? * 10,
            _ => frac.parse().map_err(|_| not_a_number())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as `$D.CC`.
///
/// ## Note
/// Reports use `DrawerConfig::format_currency` so the symbol is configurable.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a piece count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of amounts (ledger totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(4000), Money::from_cents(100), Money::from_cents(1)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 4101);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_parse_exact_cents() {
        assert_eq!("20".parse::<Money>().unwrap().cents(), 2000);
        assert_eq!("0.25".parse::<Money>().unwrap().cents(), 25);
        assert_eq!("0.1".parse::<Money>().unwrap().cents(), 10);
        assert_eq!(".05".parse::<Money>().unwrap().cents(), 5);
        assert_eq!("0.29".parse::<Money>().unwrap().cents(), 29);
        assert_eq!("$1,234.50".parse::<Money>().unwrap().cents(), 123450);
        assert_eq!(" -3.10 ".parse::<Money>().unwrap().cents(), -310);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert!(matches!("abc".parse::<Money>(), Err(ParseMoneyError::NotANumber(_))));
        assert!(matches!("1.2.3".parse::<Money>(), Err(ParseMoneyError::NotANumber(_))));
        assert!(matches!(".".parse::<Money>(), Err(ParseMoneyError::NotANumber(_))));
        assert!(matches!("1.005".parse::<Money>(), Err(ParseMoneyError::TooPrecise(_))));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(ParseMoneyError::Overflow(_))
        ));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_checked_multiply_quantity() {
        assert_eq!(
            Money::from_cents(25).checked_multiply_quantity(4),
            Some(Money::from_cents(100))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    }

    /// The case floating point gets wrong: ten dimes are exactly one dollar.
    #[test]
    fn test_dimes_add_up_exactly() {
        let dime = Money::from_cents(10);
        let total: Money = (0..10).map(|_| dime).sum();
        assert_eq!(total, Money::from_dollars(1));
    }
}
