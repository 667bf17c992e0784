//! # API Error Type
//!
//! Unified error type for app commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Feast                                  │
//! │                                                                         │
//! │  Mobile UI                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  call('place_order')                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage down? ──── DbError::ConnectionFailed ──── UNAVAILABLE ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Domain rule? ───── CoreError::EmptyCart ───────── BUSINESS_LOGIC►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ─────── ValidationError::Required ──── VALIDATION ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "UNAVAILABLE"                                            │
//! │    // e.message = "Ordering is unavailable, please try again"           │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage and internal failures are logged here with their detail; the UI
//! only ever sees a generic message for them.

use serde::Serialize;
use tracing::error;

use feast_core::{CoreError, ValidationError};
use feast_db::DbError;

/// Error returned from app commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "FoodItem not found: 3f1c..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Storage is unreachable; the UI offers a retry
    Unavailable,

    /// Database operation failed
    DatabaseError,

    /// A domain rule refused the action (empty cart, sold out, bad status move)
    BusinessLogic,

    /// Internal error
    Internal,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn business(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BusinessLogic, message)
    }

    pub fn unavailable() -> Self {
        ApiError::new(
            ErrorCode::Unavailable,
            "Ordering is unavailable, please try again",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if err.is_unavailable() {
            error!(error = %err, "Storage unavailable");
            return ApiError::unavailable();
        }

        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                ApiError::validation(format!("{} '{}' already exists", field, value))
            }
            DbError::ConstraintViolation { message } => {
                error!("Constraint violation: {}", message);
                ApiError::validation("Invalid data")
            }
            DbError::Domain(e) => ApiError::from(e),
            DbError::MigrationFailed(e) => {
                error!("Migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::TransactionFailed(e) => {
                error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::Serialization(e) => {
                error!("Stored document could not be read: {}", e);
                ApiError::internal("Stored data could not be read")
            }
            other => {
                error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::FoodItemNotFound(id) => ApiError::not_found("FoodItem", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::Validation(e) => ApiError::from(e),
            CoreError::EmptyCart
            | CoreError::FoodItemUnavailable { .. }
            | CoreError::InvalidStatusTransition { .. } => ApiError::business(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
