//! # Checkout
//!
//! Everything between "the cart" and "a submitted order". The cart knows
//! nothing about fees, tax or submission; this module reads a
//! [`CartSnapshot`] and works those out.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartSnapshot ──► CheckoutQuote::from_snapshot(policy)                  │
//! │                     subtotal      = Σ line totals                       │
//! │                     tax           = subtotal × rate (half-up)           │
//! │                     delivery_fee  = flat                                │
//! │                     total         = subtotal + tax + delivery_fee       │
//! │                                                                         │
//! │  OrderDraft ─────► into_order(snapshot, policy, now)                    │
//! │                     ├── empty cart?        → CoreError::EmptyCart       │
//! │                     ├── invalid address?   → CoreError::Validation      │
//! │                     └── Order { status: pending, payment: pending }     │
//! │                                                                         │
//! │  Submission and clearing the cart happen in the app layer.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartSnapshot;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::order::{Order, OrderItem, OrderStatus, PaymentStatus};
use crate::types::TaxRate;
use crate::validation::{validate_delivery_address, validate_email, ValidationResult};
use crate::{DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_TAX_RATE_BPS};

// =============================================================================
// Checkout Policy
// =============================================================================

/// Fees applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutPolicy {
    /// Flat fee per order.
    pub delivery_fee: Money,

    /// Applied to the subtotal only, never to the delivery fee.
    pub tax_rate: TaxRate,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        CheckoutPolicy {
            delivery_fee: Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
        }
    }
}

// =============================================================================
// Checkout Quote
// =============================================================================

/// Amounts shown on the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutQuote {
    pub item_count: u32,
    pub subtotal: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl CheckoutQuote {
    /// Computes the quote for a cart snapshot.
    ///
    /// ## Example
    /// ```rust
    /// use feast_core::cart::CartSnapshot;
    /// use feast_core::checkout::{CheckoutPolicy, CheckoutQuote};
    /// use feast_core::money::Money;
    ///
    /// let mut snapshot = CartSnapshot::default();
    /// snapshot.totals.total_price = Money::from_cents(10000);
    ///
    /// let quote = CheckoutQuote::from_snapshot(&snapshot, &CheckoutPolicy::default());
    /// assert_eq!(quote.tax.cents(), 1500);
    /// assert_eq!(quote.total.cents(), 13000); // 100 + 15 tax + 15 delivery
    /// ```
    pub fn from_snapshot(snapshot: &CartSnapshot, policy: &CheckoutPolicy) -> Self {
        let subtotal = snapshot.totals.total_price;
        let tax = subtotal.calculate_tax(policy.tax_rate);

        CheckoutQuote {
            item_count: snapshot.totals.total_items,
            subtotal,
            tax,
            delivery_fee: policy.delivery_fee,
            total: subtotal + tax + policy.delivery_fee,
        }
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// What the customer filled in on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDraft {
    pub user_id: String,
    pub delivery_address: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl OrderDraft {
    pub fn new(user_id: impl Into<String>, delivery_address: impl Into<String>) -> Self {
        OrderDraft {
            user_id: user_id.into(),
            delivery_address: delivery_address.into(),
            ..Default::default()
        }
    }

    /// Checks the customer-entered fields.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "userId".to_string(),
            });
        }

        validate_delivery_address(&self.delivery_address)?;

        if let Some(email) = non_blank(&self.customer_email) {
            validate_email(email)?;
        }

        Ok(())
    }

    /// Freezes the cart into a new pending order.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] if the snapshot has no lines
    /// - [`CoreError::Validation`] if a draft field is invalid
    pub fn into_order(
        self,
        snapshot: &CartSnapshot,
        policy: &CheckoutPolicy,
        now: DateTime<Utc>,
    ) -> CoreResult<Order> {
        if snapshot.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        self.validate()?;

        let quote = CheckoutQuote::from_snapshot(snapshot, policy);

        Ok(Order {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id.trim().to_string(),
            items: snapshot.items.iter().map(OrderItem::from).collect(),
            subtotal_cents: quote.subtotal.cents(),
            tax_cents: quote.tax.cents(),
            delivery_fee_cents: quote.delivery_fee.cents(),
            total_cents: quote.total.cents(),
            status: OrderStatus::Pending,
            delivery_address: self.delivery_address.trim().to_string(),
            customer_name: trimmed(self.customer_name),
            customer_email: trimmed(self.customer_email),
            customer_phone: trimmed(self.customer_phone),
            payment_method: trimmed(self.payment_method),
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn trimmed(value: Option<String>) -> Option<String> {
    non_blank(&value).map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::test_food;
    use crate::cart::{Cart, CartLineItem};
    use crate::customization::CustomizationSelection;

    fn cart_snapshot() -> CartSnapshot {
        let mut cart = Cart::new();
        cart.add_item(CartLineItem::new(test_food("Burger", 5000), 2, CustomizationSelection::new()));
        let mut cheese = CustomizationSelection::new();
        cheese.set_extra("Cheese", Money::from_cents(800), true).unwrap();
        cart.add_item(CartLineItem::new(test_food("Wrap", 3800), 1, cheese));
        cart.snapshot()
    }

    #[test]
    fn test_default_policy() {
        let policy = CheckoutPolicy::default();
        assert_eq!(policy.delivery_fee.cents(), 1500);
        assert_eq!(policy.tax_rate.bps(), 1500);
    }

    #[test]
    fn test_quote_math() {
        let quote = CheckoutQuote::from_snapshot(&cart_snapshot(), &CheckoutPolicy::default());

        assert_eq!(quote.item_count, 3);
        assert_eq!(quote.subtotal.cents(), 14600);
        assert_eq!(quote.tax.cents(), 2190);
        assert_eq!(quote.delivery_fee.cents(), 1500);
        assert_eq!(quote.total.cents(), 18290);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        let mut snapshot = CartSnapshot::default();
        // 15% of 1.70 = 0.255 → 0.26
        snapshot.totals.total_price = Money::from_cents(170);

        let quote = CheckoutQuote::from_snapshot(&snapshot, &CheckoutPolicy::default());
        assert_eq!(quote.tax.cents(), 26);
    }

    #[test]
    fn test_into_order() {
        let snapshot = cart_snapshot();
        let mut draft = OrderDraft::new("user-1", "  12 Long Street, Cape Town ");
        draft.customer_email = Some("thandi@example.co.za".to_string());
        draft.customer_phone = Some("   ".to_string());
        let now = Utc::now();

        let order = draft
            .into_order(&snapshot, &CheckoutPolicy::default(), now)
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_cents, 18290);
        assert_eq!(order.delivery_address, "12 Long Street, Cape Town");
        assert_eq!(order.customer_phone, None);
        assert_eq!(order.created_at, now);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let draft = OrderDraft::new("user-1", "12 Long Street");
        let err = draft
            .into_order(&CartSnapshot::default(), &CheckoutPolicy::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_blank_address_is_rejected() {
        let draft = OrderDraft::new("user-1", "   ");
        let err = draft
            .into_order(&cart_snapshot(), &CheckoutPolicy::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_bad_email_is_rejected() {
        let mut draft = OrderDraft::new("user-1", "12 Long Street");
        draft.customer_email = Some("not-an-email".to_string());
        assert!(draft.validate().is_err());
    }
}
