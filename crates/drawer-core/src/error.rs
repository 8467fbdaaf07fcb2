//! # Error Types
//!
//! Domain-specific error types for drawer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  drawer-core errors (this file)                                        │
//! │  ├── CoreError        - Lifecycle and lookup failures                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  drawer-db errors (separate crate)                                     │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  drawer-service errors                                                 │
//! │  └── ServiceError     - What the UI sees (serialized, with a code)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError ← DbError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (drawer number, shift id, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::ShiftStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A drawer number is already in use by an open shift.
    ///
    /// ## When This Occurs
    /// ```text
    /// Drawer "5" open (Alice)
    ///      │
    ///      ▼
    /// start_shift(drawer: "5", cashier: "Bob")
    ///      │
    ///      ▼
    /// DuplicateDrawer { drawer_number: "5" }
    /// ```
    /// Closed shifts never block a drawer number.
    #[error("Drawer {drawer_number} already has an open shift")]
    DuplicateDrawer { drawer_number: String },

    /// The shift is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Editing counts on a closed shift
    /// - Ending a shift that was already ended
    #[error("Shift {shift_id} is {current_status}, cannot {operation}")]
    InvalidShiftStatus {
        shift_id: String,
        current_status: ShiftStatus,
        operation: &'static str,
    },

    /// No shift with the given id.
    #[error("Shift not found: {0}")]
    ShiftNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The browser form used to coerce unreadable numbers to zero and silently
/// drop them. Every such case is now one of these variants instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (unparseable number, bad id, etc.).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An entry's stored total disagrees with denomination × quantity.
    #[error("{kind} {denomination} entry total {total} does not equal denomination × {quantity}")]
    InconsistentTotal {
        kind: String,
        denomination: String,
        quantity: i64,
        total: String,
    },

    /// Two entries share the same (kind, denomination) pair.
    #[error("duplicate {kind} entry for {denomination}")]
    DuplicateEntry { kind: String, denomination: String },

    /// The entries of one count add up past what `Money` can hold.
    #[error("{field} total is too large")]
    TotalTooLarge { field: String },

    /// A stored entry has zero quantity.
    #[error("{kind} entry for {denomination} has zero quantity")]
    ZeroQuantity { kind: String, denomination: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DuplicateDrawer {
            drawer_number: "5".to_string(),
        };
        assert_eq!(err.to_string(), "Drawer 5 already has an open shift");

        let err = CoreError::InvalidShiftStatus {
            shift_id: "abc".to_string(),
            current_status: ShiftStatus::Closed,
            operation: "edit counts",
        };
        assert_eq!(err.to_string(), "Shift abc is closed, cannot edit counts");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "cashier name".to_string(),
        };
        assert_eq!(err.to_string(), "cashier name is required");

        let err = ValidationError::Negative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "drawer number".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
