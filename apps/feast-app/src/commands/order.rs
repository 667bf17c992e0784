//! # Order Commands
//!
//! Checkout and the customer's order history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  Cart screen ── "Checkout" ──► checkout_quote()                         │
//! │                                  subtotal, VAT, delivery fee, total     │
//! │                                        │                                │
//! │                                        ▼                                │
//! │  Checkout screen (address, contact, payment method)                     │
//! │                                        │                                │
//! │                                        ▼                                │
//! │  "Place order" ──► place_order(draft)                                   │
//! │                      1. snapshot the cart                               │
//! │                      2. build a pending order (core rules)              │
//! │                      3. insert into storage ── fails? ──► cart intact   │
//! │                      4. clear the cart                                  │
//! │                                        │                                │
//! │                                        ▼                                │
//! │  Orders screen ──► get_my_orders(user_id)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::ApiResult;
use crate::state::{CartState, ConfigState, DbState};
use feast_core::{CheckoutQuote, Order, OrderDraft, ValidationError};

/// Amounts for the checkout screen, from the current cart and store fees.
pub fn checkout_quote(cart: &CartState, config: &ConfigState) -> CheckoutQuote {
    debug!("checkout_quote command");
    CheckoutQuote::from_snapshot(&cart.snapshot(), &config.checkout_policy())
}

/// Turns the cart into a pending order.
///
/// The cart is cleared only once storage has accepted the order. If the
/// insert fails the cart is left exactly as it was, so the customer can
/// retry without rebuilding it.
///
/// ## Errors
/// * `BUSINESS_LOGIC` - the cart is empty
/// * `VALIDATION_ERROR` - missing delivery address, bad email, ...
/// * `UNAVAILABLE` - storage could not be reached
pub async fn place_order(
    db: &DbState,
    cart: &mut CartState,
    config: &ConfigState,
    draft: OrderDraft,
) -> ApiResult<Order> {
    debug!(user_id = %draft.user_id, "place_order command");

    let snapshot = cart.snapshot();
    let order = draft.into_order(&snapshot, &config.checkout_policy(), Utc::now())?;

    let order = match db.inner().orders().insert(&order).await {
        Ok(order) => order,
        Err(e) => {
            warn!(order_id = %order.id, error = %e, "Order submission failed, cart kept");
            return Err(e.into());
        }
    };

    cart.with_store_mut(|store| store.clear_cart());

    info!(
        order_id = %order.id,
        user_id = %order.user_id,
        total_cents = order.total_cents,
        items = order.item_count(),
        "Order placed"
    );

    Ok(order)
}

/// The signed-in customer's orders, newest first.
pub async fn get_my_orders(db: &DbState, user_id: String) -> ApiResult<Vec<Order>> {
    debug!(user_id = %user_id, "get_my_orders command");

    if user_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "userId".to_string(),
        }
        .into());
    }

    Ok(db.inner().orders().list_by_user(user_id.trim()).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================
