//! # Error Types
//!
//! Domain-specific error types for feast-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  feast-core errors (this file)                                         │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  feast-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures (incl. "unavailable")         │
//! │                                                                         │
//! │  feast-app errors                                                      │
//! │  └── ApiError         - What the mobile UI sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError ← DbError                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations themselves never fail: they are total functions over
//! their inputs. These errors cover checkout, order handling and menu input.

use thiserror::Error;

use crate::order::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Food item cannot be found.
    #[error("Food item not found: {0}")]
    FoodItemNotFound(String),

    /// Food item exists but the kitchen is not offering it right now.
    #[error("{name} is currently unavailable")]
    FoodItemUnavailable { name: String },

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The requested status change is not allowed from the current status.
    ///
    /// ## Allowed Moves
    /// ```text
    /// pending ──► preparing ──► ready ──► delivered
    ///    │            │
    ///    └────────────┴──► cancelled
    /// ```
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g. malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
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
        let err = CoreError::InvalidStatusTransition {
            order_id: "ord-1".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        };
        assert_eq!(
            err.to_string(),
            "Order ord-1 cannot move from delivered to pending"
        );

        let err = CoreError::FoodItemUnavailable {
            name: "Beef Burger".to_string(),
        };
        assert_eq!(err.to_string(), "Beef Burger is currently unavailable");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "deliveryAddress".to_string(),
        };
        assert_eq!(err.to_string(), "deliveryAddress is required");

        let err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
