//! # Cart
//!
//! The shopping cart: an ordered list of customized lines plus the derived
//! cart-wide totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Screen Action           Operation              Cart Change             │
//! │  ─────────────           ─────────              ───────────             │
//! │                                                                         │
//! │  Confirm item ─────────► add_item() ──────────► upsert line by id      │
//! │                                                                         │
//! │  +/- on a line ────────► update_quantity() ───► qty, reprice line      │
//! │                                                                         │
//! │  Edit customization ───► update_cart_item() ──► replace line by id     │
//! │                                                                         │
//! │  Swipe to delete ──────► remove_item() ───────► drop line (or no-op)   │
//! │                                                                         │
//! │  Order placed ─────────► clear() ─────────────► empty                  │
//! │                                                                         │
//! │  After EVERY operation: aggregate recomputed from the lines.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `aggregate.total_items == Σ line.quantity`
//! - `aggregate.total_price == Σ line.total_price`
//! - every line's `total_price` equals [`pricing::line_total`] of its own
//!   food item, quantity and customization
//! - every line's quantity is at least 1
//!
//! No operation can fail. Unknown ids are silently ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::customization::CustomizationSelection;
use crate::money::Money;
use crate::pricing;
use crate::types::FoodItem;

// =============================================================================
// Cart Line Item
// =============================================================================

/// One customized instance of a food item at a given quantity.
///
/// Identity is per add, not per food item: confirming the same burger twice
/// yields two lines unless the second confirm reuses the first line's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    /// Line identity (UUID v4).
    id: String,

    /// Snapshot of the menu item at the time it was added.
    food_item: FoodItem,

    quantity: u32,

    customization: CustomizationSelection,

    /// Always derived; see [`pricing::line_total`].
    total_price: Money,
}

impl CartLineItem {
    /// Creates a new line with a fresh identity.
    pub fn new(food_item: FoodItem, quantity: u32, customization: CustomizationSelection) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), food_item, quantity, customization)
    }

    /// Creates a line with a known identity, e.g. when the edit screen
    /// rebuilds an existing line.
    pub fn with_id(
        id: impl Into<String>,
        food_item: FoodItem,
        quantity: u32,
        customization: CustomizationSelection,
    ) -> Self {
        let mut line = CartLineItem {
            id: id.into(),
            food_item,
            quantity: pricing::clamp_quantity(quantity),
            customization,
            total_price: Money::zero(),
        };
        line.reprice();
        line
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn food_item(&self) -> &FoodItem {
        &self.food_item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn customization(&self) -> &CustomizationSelection {
        &self.customization
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Price of a single unit including add-ons.
    pub fn unit_price(&self) -> Money {
        pricing::unit_price(self.food_item.price(), &self.customization)
    }

    /// Sets the quantity (clamped to at least 1) and reprices.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = pricing::clamp_quantity(quantity);
        self.reprice();
    }

    /// Replaces the customization and reprices.
    pub fn set_customization(&mut self, customization: CustomizationSelection) {
        self.customization = customization;
        self.reprice();
    }

    /// Re-derives the total from base price, add-ons and quantity, never
    /// from the previous total.
    fn reprice(&mut self) {
        self.quantity = pricing::clamp_quantity(self.quantity);
        self.total_price =
            pricing::line_total(self.food_item.price(), self.quantity, &self.customization);
    }
}

// =============================================================================
// Aggregate & Snapshot
// =============================================================================

/// Cart-wide totals. Derived only, never set directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartAggregate {
    /// Sum of line quantities.
    pub total_items: u32,

    /// Sum of line totals.
    pub total_price: Money,
}

impl CartAggregate {
    fn from_lines(lines: &[CartLineItem]) -> Self {
        CartAggregate {
            total_items: lines.iter().map(|l| l.quantity).sum(),
            total_price: lines.iter().map(|l| l.total_price).sum(),
        }
    }
}

/// Read model handed to the UI and to checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub totals: CartAggregate,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Actions
// =============================================================================

/// A cart mutation as a value, so the UI can forward `{ type, payload }`
/// objects straight into [`Cart::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    AddToCart(CartLineItem),
    RemoveFromCart(String),
    UpdateQuantity { id: String, quantity: u32 },
    UpdateCartItem(CartLineItem),
    ClearCart,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart state.
///
/// Serialize-only: the aggregate is always derived from the lines here, so
/// a cart is never read back from outside.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLineItem>,
    aggregate: CartAggregate,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line, or replaces the line with the same id in place.
    pub fn add_item(&mut self, mut line: CartLineItem) {
        line.reprice();

        match self.position(&line.id) {
            Some(index) => {
                debug!(line_id = %line.id, "Replacing cart line");
                self.items[index] = line;
            }
            None => {
                debug!(line_id = %line.id, food_item = %line.food_item.name, "Adding cart line");
                self.items.push(line);
            }
        }

        self.recompute();
    }

    /// Removes the line with this id. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|l| l.id != id);

        if self.items.len() != before {
            debug!(line_id = %id, "Removed cart line");
            self.recompute();
        }
    }

    /// Sets a line's quantity and reprices it from its stored customization.
    ///
    /// Quantities below 1 are clamped to 1. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        if let Some(line) = self.items.iter_mut().find(|l| l.id == id) {
            line.set_quantity(quantity);
            debug!(line_id = %id, quantity = line.quantity, "Updated cart line quantity");
            self.recompute();
        }
    }

    /// Replaces an existing line wholesale (customization edits).
    ///
    /// Unlike [`Cart::add_item`] this never appends: an unknown id is a no-op.
    pub fn update_cart_item(&mut self, mut line: CartLineItem) {
        if let Some(index) = self.position(&line.id) {
            line.reprice();
            debug!(line_id = %line.id, "Updated cart line");
            self.items[index] = line;
            self.recompute();
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.aggregate = CartAggregate::default();
    }

    /// Single state-transition entry point for action values.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::AddToCart(line) => self.add_item(line),
            CartAction::RemoveFromCart(id) => self.remove_item(&id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(&id, quantity),
            CartAction::UpdateCartItem(line) => self.update_cart_item(line),
            CartAction::ClearCart => self.clear(),
        }
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|l| l.id == id)
    }

    pub fn aggregate(&self) -> CartAggregate {
        self.aggregate
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Owned copy of the current lines and totals.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            totals: self.aggregate,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|l| l.id == id)
    }

    fn recompute(&mut self) {
        self.aggregate = CartAggregate::from_lines(&self.items);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::Utc;

    pub(crate) fn test_food(name: &str, price_cents: i64) -> FoodItem {
        FoodItem {
            id: format!("food-{}", name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            description: format!("{} from the grill", name),
            price_cents,
            category: Category::Burgers,
            image_url: None,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn with_extra(name: &str, cents: i64) -> CustomizationSelection {
        let mut selection = CustomizationSelection::new();
        selection.set_extra(name, Money::from_cents(cents), true).unwrap();
        selection
    }

    fn assert_invariants(cart: &Cart) {
        let quantities: u32 = cart.items().iter().map(|l| l.quantity()).sum();
        let totals: Money = cart.items().iter().map(|l| l.total_price()).sum();
        assert_eq!(cart.aggregate().total_items, quantities);
        assert_eq!(cart.aggregate().total_price, totals);
        for line in cart.items() {
            assert!(line.quantity() >= 1);
            assert_eq!(
                line.total_price(),
                pricing::line_total(line.food_item().price(), line.quantity(), line.customization())
            );
        }
    }

    #[test]
    fn test_add_item_appends_new_lines() {
        let mut cart = Cart::new();
        let burger = test_food("Beef Burger", 5000);

        cart.add_item(CartLineItem::new(burger.clone(), 1, CustomizationSelection::new()));
        cart.add_item(CartLineItem::new(burger, 1, CustomizationSelection::new()));

        // Same food item, two confirms: two lines
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.aggregate().total_items, 2);
        assert_eq!(cart.aggregate().total_price.cents(), 10000);
    }

    #[test]
    fn test_add_item_with_existing_id_replaces_in_place() {
        let mut cart = Cart::new();
        cart.add_item(CartLineItem::with_id("a", test_food("Wings", 6000), 1, CustomizationSelection::new()));
        cart.add_item(CartLineItem::with_id("b", test_food("Salad", 4000), 1, CustomizationSelection::new()));
        cart.add_item(CartLineItem::with_id("a", test_food("Wings", 6000), 3, CustomizationSelection::new()));

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.items()[0].id(), "a");
        assert_eq!(cart.items()[0].quantity(), 3);
        assert_eq!(cart.aggregate().total_price.cents(), 22000);
    }

    #[test]
    fn test_two_lines_aggregate() {
        let mut cart = Cart::new();
        // 50.00 × 2 = 100.00
        cart.add_item(CartLineItem::new(test_food("Burger", 5000), 2, CustomizationSelection::new()));
        // (38.00 + 8.00) × 1 = 46.00
        cart.add_item(CartLineItem::new(test_food("Wrap", 3800), 1, with_extra("Cheese", 800)));

        assert_eq!(cart.aggregate().total_price, Money::from_cents(14600));
        assert_eq!(cart.aggregate().total_items, 3);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(CartLineItem::new(test_food("Burger", 5000), 2, CustomizationSelection::new()));
        let before = cart.clone();

        cart.remove_item("does-not-exist");

        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let line = CartLineItem::new(test_food("Burger", 5000), 2, CustomizationSelection::new());
        let id = line.id().to_string();
        cart.add_item(line);

        cart.remove_item(&id);

        assert!(cart.is_empty());
        assert_eq!(cart.aggregate(), CartAggregate::default());
    }

    #[test]
    fn test_update_quantity_reprices_from_customization() {
        let mut cart = Cart::new();
        let line = CartLineItem::new(test_food("Burger", 5000), 1, with_extra("Bacon", 1500));
        let id = line.id().to_string();
        cart.add_item(line);

        cart.update_quantity(&id, 4);

        // (50 + 15) × 4, extras kept
        assert_eq!(cart.get(&id).unwrap().total_price().cents(), 26000);
        assert_eq!(cart.aggregate().total_items, 4);
        assert_invariants(&cart);
    }

    #[test]
    fn test_update_quantity_is_idempotent() {
        let mut cart = Cart::new();
        let line = CartLineItem::new(test_food("Burger", 5000), 1, with_extra("Cheese", 800));
        let id = line.id().to_string();
        cart.add_item(line);

        cart.update_quantity(&id, 3);
        let once = cart.clone();
        cart.update_quantity(&id, 3);

        assert_eq!(cart, once);
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        let line = CartLineItem::new(test_food("Burger", 5000), 2, CustomizationSelection::new());
        let id = line.id().to_string();
        cart.add_item(line);

        cart.update_quantity(&id, 0);

        assert_eq!(cart.get(&id).unwrap().quantity(), 1);
        assert_eq!(cart.aggregate().total_price.cents(), 5000);
    }

    #[test]
    fn test_update_cart_item_replaces_customization() {
        let mut cart = Cart::new();
        let burger = test_food("Burger", 5000);
        let line = CartLineItem::new(burger.clone(), 3, CustomizationSelection::new());
        let id = line.id().to_string();
        cart.add_item(line);
        assert_eq!(cart.aggregate().total_price.cents(), 15000);

        let edited = CartLineItem::with_id(id.clone(), burger, 3, with_extra("Cheese", 800));
        cart.update_cart_item(edited);

        // (50 + 8) × 3
        assert_eq!(cart.get(&id).unwrap().total_price().cents(), 17400);
        assert_eq!(cart.aggregate().total_price.cents(), 17400);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_update_cart_item_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(CartLineItem::new(test_food("Burger", 5000), 1, CustomizationSelection::new()));
        let before = cart.clone();

        cart.update_cart_item(CartLineItem::new(test_food("Wrap", 3000), 1, CustomizationSelection::new()));

        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(CartLineItem::new(test_food("Burger", 5000), 2, with_extra("Cheese", 800)));
        cart.add_item(CartLineItem::new(test_food("Wrap", 3000), 1, CustomizationSelection::new()));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.aggregate().total_items, 0);
        assert!(cart.aggregate().total_price.is_zero());

        // Clearing an empty cart is fine too
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stale_total_is_repriced_on_entry() {
        let line = CartLineItem::new(test_food("Burger", 5000), 2, CustomizationSelection::new());
        let mut json = serde_json::to_value(&line).unwrap();
        json["totalPrice"] = serde_json::json!(1);
        let tampered: CartLineItem = serde_json::from_value(json).unwrap();

        let mut cart = Cart::new();
        cart.add_item(tampered);

        assert_eq!(cart.aggregate().total_price.cents(), 10000);
    }

    #[test]
    fn test_apply_actions() {
        let mut cart = Cart::new();
        let line = CartLineItem::with_id("line-1", test_food("Burger", 5000), 1, CustomizationSelection::new());

        cart.apply(CartAction::AddToCart(line));
        cart.apply(CartAction::UpdateQuantity {
            id: "line-1".to_string(),
            quantity: 2,
        });
        assert_eq!(cart.aggregate().total_price.cents(), 10000);

        cart.apply(CartAction::RemoveFromCart("line-1".to_string()));
        assert!(cart.is_empty());

        cart.apply(CartAction::ClearCart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_action_wire_format() {
        let action: CartAction = serde_json::from_str(
            r#"{ "type": "UPDATE_QUANTITY", "payload": { "id": "line-1", "quantity": 2 } }"#,
        )
        .unwrap();
        assert_eq!(
            action,
            CartAction::UpdateQuantity {
                id: "line-1".to_string(),
                quantity: 2
            }
        );

        let clear: CartAction = serde_json::from_str(r#"{ "type": "CLEAR_CART" }"#).unwrap();
        assert_eq!(clear, CartAction::ClearCart);
    }

    fn add_action_json(customization: serde_json::Value) -> serde_json::Value {
        let line = CartLineItem::with_id("line-1", test_food("Burger", 5000), 1, CustomizationSelection::new());
        let mut payload = serde_json::to_value(&line).unwrap();
        payload["customization"] = customization;
        serde_json::json!({ "type": "ADD_TO_CART", "payload": payload })
    }

    #[test]
    fn test_add_action_with_three_sides_is_refused() {
        let json = add_action_json(serde_json::json!({
            "sides": ["Pap", "Chips", "Rice"],
            "drinks": [],
            "extras": [],
            "removedIngredients": []
        }));

        assert!(serde_json::from_value::<CartAction>(json).is_err());
    }

    #[test]
    fn test_add_action_with_negative_extra_is_refused() {
        let json = add_action_json(serde_json::json!({
            "extras": [{ "name": "Discount", "price": -10000, "selected": true }]
        }));

        assert!(serde_json::from_value::<CartAction>(json).is_err());
    }

    #[test]
    fn test_add_action_from_json_keeps_side_limit() {
        let json = add_action_json(serde_json::json!({
            "sides": ["Pap", "Chips"],
            "extras": [{ "name": "Cheese", "price": 800, "selected": true }]
        }));
        let action: CartAction = serde_json::from_value(json).unwrap();

        let mut cart = Cart::new();
        cart.apply(action);

        let line = cart.get("line-1").unwrap();
        assert!(line.customization().sides().len() <= crate::MAX_SIDES);
        assert_eq!(line.total_price().cents(), 5800);
        assert_invariants(&cart);
    }

    #[test]
    fn test_invariants_hold_over_mixed_sequence() {
        let mut cart = Cart::new();
        let menu = [
            test_food("Burger", 5000),
            test_food("Wrap", 3800),
            test_food("Wings", 6500),
        ];

        // Deterministic pseudo-random walk over add/remove/update_quantity
        let mut seed: u64 = 0x5eed;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        for _ in 0..200 {
            match next() % 3 {
                0 => {
                    let food = menu[next() % menu.len()].clone();
                    let extra = with_extra("Cheese", 800);
                    cart.add_item(CartLineItem::new(food, (next() % 5) as u32, extra));
                }
                1 => {
                    let id = match cart.items().get(next() % (cart.line_count() + 1)) {
                        Some(line) => line.id().to_string(),
                        None => "missing".to_string(),
                    };
                    cart.remove_item(&id);
                }
                _ => {
                    if let Some(line) = cart.items().first() {
                        let id = line.id().to_string();
                        cart.update_quantity(&id, (next() % 6) as u32);
                    }
                }
            }
            assert_invariants(&cart);
        }
    }

    #[test]
    fn test_snapshot_matches_cart() {
        let mut cart = Cart::new();
        cart.add_item(CartLineItem::new(test_food("Burger", 5000), 2, CustomizationSelection::new()));

        let snapshot = cart.snapshot();

        assert_eq!(snapshot.items.as_slice(), cart.items());
        assert_eq!(snapshot.totals, cart.aggregate());
        assert!(!snapshot.is_empty());
    }
}
