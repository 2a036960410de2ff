//! # Service Error Type
//!
//! Unified error type for service operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Dhaba POS                              │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  call finalize_bill                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service method                                                  │  │
//! │  │  Result<T, ServiceError>                                         │  │
//! │  │         │                                                        │  │
//! │  │  CoreError (empty bill, no table)  ──┐                           │  │
//! │  │  DbError (query failed, not found) ──┼──► ServiceError ─────────►│  │
//! │  │  Success ────────────────────────────┘                           │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.message = "Cannot finalize a bill with no items"                │
//! │    // e.code = "BUSINESS_LOGIC"                                         │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The frontend shows `message` in a toast and branches on `code`.

use serde::Serialize;

use dhaba_core::CoreError;
use dhaba_db::DbError;

/// Error returned from service operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Transaction not found: 3f1a..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Business rule violation (empty bill, no table selected, ...)
    BusinessLogic,

    /// Export requested but nothing matched the filters
    NothingToExport,

    /// Internal error
    Internal,
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
        ServiceError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a nothing-to-export error.
    pub fn nothing_to_export() -> Self {
        ServiceError::new(
            ErrorCode::NothingToExport,
            "There are no transactions matching your filters",
        )
    }
}

/// Converts core errors to service errors.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoTableSelected => {
                ServiceError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::UnknownTable(ref id) => ServiceError::not_found("Table", id),
            CoreError::LineNotFound(ref id) => ServiceError::not_found("Order item", id),
            CoreError::EmptyOrder { .. } | CoreError::EmptyBill => {
                ServiceError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => ServiceError::validation(e.to_string()),
        }
    }
}

/// Converts database errors to service errors.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ServiceError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::CheckViolation { message } => {
                tracing::error!("Check violation: {}", message);
                ServiceError::new(ErrorCode::ValidationError, "Invalid value")
            }
            DbError::ConnectionFailed(_) => {
                ServiceError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ServiceError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::InvalidItemsPayload(e) => {
                tracing::error!("Items payload invalid: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Stored record is corrupt")
            }
            DbError::PoolExhausted => {
                ServiceError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ServiceError = CoreError::EmptyBill.into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err: ServiceError = CoreError::UnknownTable("Z9".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Table not found: Z9");
    }

    #[test]
    fn test_db_error_mapping() {
        let err: ServiceError = DbError::not_found("Transaction", "abc").into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ServiceError = DbError::PoolExhausted.into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_serializes_with_screaming_code() {
        let err = ServiceError::nothing_to_export();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOTHING_TO_EXPORT");
        assert!(json["message"].is_string());
    }
}
