//! # Cart Commands
//!
//! Cart manipulation from the item, cart and edit screens.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Screen  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                      place_order         │
//! │                   update_cart_quantity             (order.rs)          │
//! │                   update_cart_item                       │              │
//! │                   remove_from_cart                       │              │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear_cart ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart itself never fails: unknown line ids are ignored and quantities
//! below one are clamped. The errors here come from the lookups and input
//! checks done before the cart is touched.
//!
//! A customization from the screen is only a list of picks. Drink and extra
//! prices are looked up again in the house [`CustomizationMenu`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{CartState, DbState};
use feast_core::validation::validate_quantity;
use feast_core::{
    CartAggregate, CartLineItem, CartSnapshot, CoreError, CustomizationMenu,
    CustomizationSelection,
};

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartAggregate,
}

impl From<CartSnapshot> for CartResponse {
    fn from(snapshot: CartSnapshot) -> Self {
        CartResponse {
            items: snapshot.items,
            totals: snapshot.totals,
        }
    }
}

/// Input from the item screen's "Add to cart" button.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub food_item_id: String,

    /// Defaults to 1
    #[serde(default)]
    pub quantity: Option<i64>,

    /// Defaults to the house option menu with nothing picked
    #[serde(default)]
    pub customization: Option<CustomizationSelection>,
}

/// Input from the edit screen's "Update" button.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub line_id: String,
    pub quantity: i64,
    pub customization: CustomizationSelection,
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart screen                                                            │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  YOUR ORDER                                         3 items    │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Classic Beef Burger  x2   Chips, Coke            R208.00      │    │
/// │  │  Milk Tart            x1                           R45.00      │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Total                                            R253.00      │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                                                                         │
/// │  get_cart() → { items: [...], totals: { totalItems, totalPrice } }      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(cart.snapshot())
}

/// Adds a customized item to the cart.
///
/// ## Behavior
/// - The item is fetched from storage so the line carries the current price
/// - Sold-out items are refused
/// - Every add creates a new line, even for an item already in the cart,
///   since two burgers with different sides are different lines
///
/// ## Errors
/// * `NOT_FOUND` - no such menu item
/// * `BUSINESS_LOGIC` - the item is unavailable
/// * `VALIDATION_ERROR` - quantity out of range, or an option the menu does
///   not offer
pub async fn add_to_cart(
    db: &DbState,
    cart: &mut CartState,
    request: AddToCartRequest,
) -> ApiResult<CartResponse> {
    let quantity = request.quantity.unwrap_or(1);
    debug!(food_item_id = %request.food_item_id, quantity, "add_to_cart command");

    validate_quantity(quantity)?;

    let food_item = db
        .inner()
        .food_items()
        .get_by_id(&request.food_item_id)
        .await?
        .ok_or_else(|| CoreError::FoodItemNotFound(request.food_item_id.clone()))?;

    if !food_item.available {
        return Err(CoreError::FoodItemUnavailable {
            name: food_item.name,
        }
        .into());
    }

    let menu = CustomizationMenu::default();
    let customization = match request.customization {
        Some(requested) => menu.price_selection(&requested)?,
        None => CustomizationSelection::from_menu(&menu),
    };

    let line = CartLineItem::new(food_item, to_cart_quantity(quantity), customization);

    Ok(cart.with_store_mut(|store| {
        store.add_item(line);
        CartResponse::from(store.snapshot())
    }))
}

/// Sets a line's quantity from the +/- buttons.
///
/// Quantities below 1 are treated as 1; removing a line is an explicit
/// [`remove_from_cart`].
pub fn update_cart_quantity(
    cart: &mut CartState,
    line_id: String,
    quantity: i64,
) -> ApiResult<CartResponse> {
    debug!(line_id = %line_id, quantity, "update_cart_quantity command");

    let quantity = quantity.max(1);
    validate_quantity(quantity)?;

    Ok(cart.with_store_mut(|store| {
        store.update_quantity(&line_id, to_cart_quantity(quantity));
        CartResponse::from(store.snapshot())
    }))
}

/// Replaces a line's quantity and customization from the edit screen.
///
/// The line keeps its id and its menu item snapshot. A line that is no
/// longer in the cart is left alone and the current cart is returned.
pub fn update_cart_item(
    cart: &mut CartState,
    request: UpdateCartItemRequest,
) -> ApiResult<CartResponse> {
    debug!(line_id = %request.line_id, quantity = request.quantity, "update_cart_item command");

    validate_quantity(request.quantity)?;
    let customization = CustomizationMenu::default().price_selection(&request.customization)?;

    let quantity = to_cart_quantity(request.quantity);

    Ok(cart.with_store_mut(|store| {
        let existing = store.cart().get(&request.line_id).map(|l| l.food_item().clone());

        if let Some(food_item) = existing {
            store.update_cart_item(CartLineItem::with_id(
                request.line_id,
                food_item,
                quantity,
                customization,
            ));
        }

        CartResponse::from(store.snapshot())
    }))
}

/// Removes a line. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(cart: &mut CartState, line_id: String) -> CartResponse {
    debug!(line_id = %line_id, "remove_from_cart command");

    cart.with_store_mut(|store| {
        store.remove_item(&line_id);
        CartResponse::from(store.snapshot())
    })
}

/// Clears all lines from the cart.
pub fn clear_cart(cart: &mut CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_store_mut(|store| {
        store.clear_cart();
        CartResponse::from(store.snapshot())
    })
}

/// Only called after `validate_quantity`, so the value fits.
fn to_cart_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity).unwrap_or(1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::{menu_item, session};
    use feast_core::{Category, Money, SideToggle};
    use std::sync::{Arc, Mutex};

    fn add(id: &str, quantity: i64) -> AddToCartRequest {
        AddToCartRequest {
            food_item_id: id.to_string(),
            quantity: Some(quantity),
            customization: None,
        }
    }

    #[tokio::test]
    async fn test_add_to_cart_prices_from_storage() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;

        let response = add_to_cart(&session.db, &mut session.cart, add(&burger.id, 2))
            .await
            .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total_items, 2);
        assert_eq!(response.totals.total_price, Money::from_cents(10000));
    }

    #[tokio::test]
    async fn test_add_to_cart_with_customization() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;

        let mut selection = CustomizationSelection::from_menu(&CustomizationMenu::default());
        assert_eq!(selection.select_side("Chips"), SideToggle::Added);
        selection.set_drink("Coke", Money::from_cents(1500), true).unwrap();
        selection.set_extra("Cheese", Money::from_cents(800), true).unwrap();

        let request = AddToCartRequest {
            food_item_id: burger.id.clone(),
            quantity: Some(2),
            customization: Some(selection),
        };
        let response = add_to_cart(&session.db, &mut session.cart, request)
            .await
            .unwrap();

        assert_eq!(response.totals.total_price, Money::from_cents(14600));
    }

    #[tokio::test]
    async fn test_add_unavailable_item_is_refused() {
        let mut session = session().await;
        let tart = menu_item(&session, "Milk Tart", 4500, Category::Desserts, false).await;

        let err = add_to_cart(&session.db, &mut session.cart, add(&tart.id, 1))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert!(session.cart.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_item_is_not_found() {
        let mut session = session().await;

        let err = add_to_cart(&session.db, &mut session.cart, add("missing", 1))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_quantity_before_lookup() {
        let mut session = session().await;

        let err = add_to_cart(&session.db, &mut session.cart, add("missing", 0))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_quantity_clamps_and_reprices() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;
        let response = add_to_cart(&session.db, &mut session.cart, add(&burger.id, 1))
            .await
            .unwrap();
        let line_id = response.items[0].id().to_string();

        let response = update_cart_quantity(&mut session.cart, line_id.clone(), 3).unwrap();
        assert_eq!(response.totals.total_price, Money::from_cents(15000));

        let response = update_cart_quantity(&mut session.cart, line_id.clone(), 0).unwrap();
        assert_eq!(response.items[0].quantity(), 1);

        let err = update_cart_quantity(&mut session.cart, line_id, 500).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_cart_item_keeps_identity() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;
        let response = add_to_cart(&session.db, &mut session.cart, add(&burger.id, 1))
            .await
            .unwrap();
        let line_id = response.items[0].id().to_string();

        let mut selection = response.items[0].customization().clone();
        selection.set_extra("Cheese", Money::from_cents(800), true).unwrap();

        let response = update_cart_item(
            &mut session.cart,
            UpdateCartItemRequest {
                line_id: line_id.clone(),
                quantity: 3,
                customization: selection,
            },
        )
        .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].id(), line_id);
        assert_eq!(response.totals.total_price, Money::from_cents(17400));
    }

    #[tokio::test]
    async fn test_update_cart_item_unknown_line_is_noop() {
        let mut session = session().await;

        let response = update_cart_item(
            &mut session.cart,
            UpdateCartItemRequest {
                line_id: "ghost".to_string(),
                quantity: 2,
                customization: CustomizationSelection::new(),
            },
        )
        .unwrap();

        assert!(response.items.is_empty());
    }

    #[test]
    fn test_requests_with_too_many_sides_do_not_parse() {
        let update = serde_json::json!({
            "lineId": "l-1",
            "quantity": 1,
            "customization": { "sides": ["Pap", "Chips", "Rice"] }
        });
        assert!(serde_json::from_value::<UpdateCartItemRequest>(update).is_err());

        let add = serde_json::json!({
            "foodItemId": "food-1",
            "customization": { "sides": ["Pap", "Chips", "Rice"] }
        });
        assert!(serde_json::from_value::<AddToCartRequest>(add).is_err());
    }

    #[test]
    fn test_requests_with_negative_prices_do_not_parse() {
        let add = serde_json::json!({
            "foodItemId": "food-1",
            "customization": {
                "extras": [{ "name": "Cheese", "price": -9000, "selected": true }]
            }
        });
        assert!(serde_json::from_value::<AddToCartRequest>(add).is_err());
    }

    #[tokio::test]
    async fn test_add_to_cart_ignores_client_prices() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;

        let mut selection = CustomizationSelection::new();
        selection.set_extra("Cheese", Money::zero(), true).unwrap();

        let request = AddToCartRequest {
            food_item_id: burger.id.clone(),
            quantity: Some(1),
            customization: Some(selection),
        };
        let response = add_to_cart(&session.db, &mut session.cart, request)
            .await
            .unwrap();

        // Cheese is R8.00 on the menu
        assert_eq!(response.totals.total_price, Money::from_cents(5800));
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_options_not_on_menu() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;

        let mut selection = CustomizationSelection::new();
        selection.set_extra("Truffle", Money::from_cents(100), true).unwrap();

        let request = AddToCartRequest {
            food_item_id: burger.id.clone(),
            quantity: Some(1),
            customization: Some(selection),
        };
        let err = add_to_cart(&session.db, &mut session.cart, request)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(session.cart.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_update_cart_item_reprices_from_menu() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;
        let response = add_to_cart(&session.db, &mut session.cart, add(&burger.id, 1))
            .await
            .unwrap();
        let line_id = response.items[0].id().to_string();

        let mut selection = CustomizationSelection::new();
        selection.set_drink("Juice", Money::from_cents(1), true).unwrap();

        let response = update_cart_item(
            &mut session.cart,
            UpdateCartItemRequest {
                line_id,
                quantity: 2,
                customization: selection,
            },
        )
        .unwrap();

        // (50 + 20) x 2
        assert_eq!(response.totals.total_price, Money::from_cents(14000));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;
        let tart = menu_item(&session, "Milk Tart", 4500, Category::Desserts, true).await;
        add_to_cart(&session.db, &mut session.cart, add(&burger.id, 1))
            .await
            .unwrap();
        let response = add_to_cart(&session.db, &mut session.cart, add(&tart.id, 1))
            .await
            .unwrap();

        let unchanged = remove_from_cart(&mut session.cart, "ghost".to_string());
        assert_eq!(unchanged, response);

        let burger_line = response.items[0].id().to_string();
        let response = remove_from_cart(&mut session.cart, burger_line);
        assert_eq!(response.totals.total_price, Money::from_cents(4500));

        let response = clear_cart(&mut session.cart);
        assert!(response.items.is_empty());
        assert_eq!(response.totals, CartAggregate::default());
        assert_eq!(get_cart(&session.cart), response);
    }

    #[tokio::test]
    async fn test_subscribers_see_command_changes() {
        let mut session = session().await;
        let burger = menu_item(&session, "Beef Burger", 5000, Category::Burgers, true).await;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        session
            .cart
            .subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.totals.total_items));

        add_to_cart(&session.db, &mut session.cart, add(&burger.id, 2))
            .await
            .unwrap();
        clear_cart(&mut session.cart);

        assert_eq!(*seen.lock().unwrap(), vec![2, 0]);
    }
}
