//! # Validation Module
//!
//! Input validation for Feast.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile UI                                                    │
//! │  ├── Empty-field alerts ("Please enter a delivery address")            │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: App command (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price_cents >= 0)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use feast_core::validation::{validate_food_name, validate_price_cents};
//!
//! validate_food_name("Beef Burger").unwrap();
//! validate_price_cents(8999).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_ADDRESS_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_ITEM_QUANTITY, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a food item name.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use feast_core::validation::validate_food_name;
///
/// assert!(validate_food_name("Peri-Peri Chicken").is_ok());
/// assert!(validate_food_name("   ").is_err());
/// ```
pub fn validate_food_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name, MAX_NAME_LENGTH)
}

/// Validates a food item description. Empty is allowed.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

/// Validates a delivery address.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most [`MAX_ADDRESS_LENGTH`] characters
pub fn validate_delivery_address(address: &str) -> ValidationResult<()> {
    validate_required_text("deliveryAddress", address, MAX_ADDRESS_LENGTH)
}

/// Validates an optional customer email.
///
/// Only the shape is checked: one `@` with something on both sides and a dot
/// in the domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "customerEmail".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing @"))?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@example.com"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use feast_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(8999).is_ok());  // R89.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    validate_non_negative("price", cents)
}

/// Rejects a negative amount, naming `field` in the error.
pub fn validate_non_negative(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity entered on the item screen.
///
/// ## Rules
/// - Between 1 and [`MAX_ITEM_QUANTITY`]
///
/// The cart itself clamps rather than rejects; this is for command input.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use feast_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
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

    #[test]
    fn test_validate_food_name() {
        assert!(validate_food_name("Beef Burger").is_ok());
        assert!(validate_food_name("").is_err());
        assert!(validate_food_name("   ").is_err());
        assert!(validate_food_name(&"A".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("").is_ok());
        assert!(validate_description("Flame-grilled, with house sauce").is_ok());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_delivery_address() {
        assert!(validate_delivery_address("12 Long Street, Cape Town").is_ok());
        assert_eq!(
            validate_delivery_address("  \t").unwrap_err(),
            ValidationError::Required {
                field: "deliveryAddress".to_string()
            }
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("thandi@example.co.za").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a@localhost").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(8999).is_ok());
        assert!(matches!(
            validate_price_cents(-1),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
    }

    #[test]
    fn test_validate_non_negative_names_field() {
        assert!(validate_non_negative("extra price", 0).is_ok());
        assert_eq!(
            validate_non_negative("extra price", -1),
            Err(ValidationError::MustBeNonNegative {
                field: "extra price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(1500).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  burger ").unwrap(), "burger");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
