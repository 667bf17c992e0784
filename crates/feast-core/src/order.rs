//! # Orders
//!
//! A submitted order is an independent record: once the cart is turned into
//! an [`Order`] nothing links the two any more, and later menu or cart edits
//! never touch it.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Status Machine                             │
//! │                                                                         │
//! │   ┌─────────┐     ┌───────────┐     ┌─────────┐     ┌───────────┐      │
//! │   │ pending │────►│ preparing │────►│  ready  │────►│ delivered │      │
//! │   └────┬────┘     └─────┬─────┘     └─────────┘     └───────────┘      │
//! │        │                │                                               │
//! │        │                ▼                                               │
//! │        │          ┌───────────┐                                         │
//! │        └─────────►│ cancelled │                                         │
//! │                   └───────────┘                                         │
//! │                                                                         │
//! │   delivered and cancelled are terminal.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::cart::CartLineItem;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in the kitchen/delivery flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by the customer, not yet picked up by the kitchen.
    Pending,
    Preparing,
    /// Cooked and waiting for the driver.
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// True for statuses no further transition can leave.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The next step on the happy path, if any.
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Whether moving from `self` to `to` is allowed.
    ///
    /// Re-setting the current status is not a transition and is rejected.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if to == OrderStatus::Cancelled {
            return matches!(self, OrderStatus::Pending | OrderStatus::Preparing);
        }
        self.next() == Some(to)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|st| st.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL.iter().map(|st| st.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Payment Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// One line of a submitted order, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub food_item_id: String,
    pub name: String,

    /// Base price plus add-ons, per unit.
    pub unit_price_cents: i64,

    pub quantity: u32,
    pub line_total_cents: i64,

    /// Readable customization lines ("Sides: Pap", "No: Onion", ...).
    #[serde(default)]
    pub customizations: Vec<String>,
}

impl OrderItem {
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        OrderItem {
            food_item_id: line.food_item().id.clone(),
            name: line.food_item().name.clone(),
            unit_price_cents: line.unit_price().cents(),
            quantity: line.quantity(),
            line_total_cents: line.total_price().cents(),
            customizations: line.customization().summary(),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,

    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,

    pub status: OrderStatus,
    pub delivery_address: String,

    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,

    /// Free-form label of the chosen card or method ("Visa •••• 1234").
    pub payment_method: Option<String>,
    pub payment_status: PaymentStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    pub fn delivery_fee(&self) -> Money {
        Money::from_cents(self.delivery_fee_cents)
    }

    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Moves the order to `to`, stamping `updated_at`.
    ///
    /// ## Errors
    /// [`CoreError::InvalidStatusTransition`] if the move is not allowed;
    /// the order is left untouched.
    pub fn transition_to(&mut self, to: OrderStatus, now: DateTime<Utc>) -> CoreResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(CoreError::InvalidStatusTransition {
                order_id: self.id.clone(),
                from: self.status,
                to,
            });
        }

        self.status = to;
        self.updated_at = now;
        Ok(())
    }
}

/// Orders matching `status`, or all of them when no filter is given.
pub fn filter_by_status(orders: &[Order], status: Option<OrderStatus>) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| status.map_or(true, |s| o.status == s))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
