//! # Service Error Type
//!
//! The one error type the UI sees.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Cash Drawer                        │
//! │                                                                         │
//! │  ShiftManager::end_shift                                               │
//! │         │                                                               │
//! │         ├── CoreError::InvalidShiftStatus ──► INVALID_STATE            │
//! │         ├── ValidationError::Negative ──────► VALIDATION_ERROR         │
//! │         ├── DbError::Conflict ──────────────► CONFLICT                 │
//! │         └── DbError::PoolExhausted ─────────► PERSISTENCE_ERROR        │
//! │                                                    (retryable)          │
//! │                                                                         │
//! │  UI receives: { "code": "INVALID_STATE", "message": "Shift ... " }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `is_retryable()` separates infrastructure trouble (try again later) from
//! input the cashier has to fix.

use serde::Serialize;
use std::fmt;

use drawer_core::{CoreError, ValidationError};
use drawer_db::DbError;

/// Error returned from every `ShiftManager` operation.
///
/// ## Serialization
/// ```json
/// { "code": "DUPLICATE_DRAWER", "message": "Drawer 5 already has an open shift" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for UI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input the cashier has to correct
    ValidationError,

    /// Another open shift already uses the drawer number
    DuplicateDrawer,

    /// Operation not allowed in the shift's current status
    InvalidState,

    /// Shift id does not exist
    NotFound,

    /// The shift changed since it was read
    Conflict,

    /// Storage is unavailable or failed
    PersistenceError,
}

impl ServiceError {
    /// Creates a new service error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ServiceError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ServiceError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::ValidationError, message)
    }

    pub fn duplicate_drawer(drawer_number: &str) -> Self {
        ServiceError::from(CoreError::DuplicateDrawer {
            drawer_number: drawer_number.to_string(),
        })
    }

    /// True when the same call may succeed later without any input change.
    pub fn is_retryable(&self) -> bool {
        self.code == ErrorCode::PersistenceError
    }
}

/// Converts storage errors to service errors.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } if field.ends_with("drawer_number") => {
                ServiceError::duplicate_drawer(&value)
            }
            DbError::UniqueViolation { field, value } => ServiceError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            err @ DbError::Conflict { .. } => ServiceError::new(ErrorCode::Conflict, err.to_string()),
            DbError::InvalidRequest(message) => ServiceError::validation(message),
            DbError::Serialization(e) => {
                tracing::error!(error = %e, "Stored shift could not be decoded");
                ServiceError::new(ErrorCode::PersistenceError, "Stored shift data is unreadable")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Storage operation failed");
                ServiceError::new(ErrorCode::PersistenceError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors to service errors.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::DuplicateDrawer { .. } => ErrorCode::DuplicateDrawer,
            CoreError::InvalidShiftStatus { .. } => ErrorCode::InvalidState,
            CoreError::ShiftNotFound(_) => ErrorCode::NotFound,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ServiceError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::validation(err.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
