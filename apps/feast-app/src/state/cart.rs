//! # Cart State
//!
//! The session's cart store.
//!
//! There is exactly one writer (the user driving the app), so the store is a
//! plain owned value: mutating commands borrow `&mut CartState` and reads
//! borrow `&CartState`. Screens that need to redraw on every change register
//! a listener with [`CartState::subscribe`].
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Screen Action            Command                 Store Change          │
//! │  ─────────────            ───────                 ────────────          │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_to_cart() ────────► add_item(line)      │
//! │                                                                         │
//! │  +/- buttons ────────────► update_cart_quantity() ► update_quantity    │
//! │                                                                         │
//! │  Edit item screen ───────► update_cart_item() ───► update_cart_item    │
//! │                                                                         │
//! │  Swipe to remove ────────► remove_from_cart() ───► remove_item(id)     │
//! │                                                                         │
//! │  Order placed ───────────► place_order() ────────► clear_cart()        │
//! │                                                                         │
//! │  Every write notifies subscribers with the new CartSnapshot.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use feast_core::{CartSnapshot, CartStore, SubscriptionId};

#[derive(Debug, Default)]
pub struct CartState {
    store: CartStore,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        f(&mut self.store)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.store.snapshot()
    }

    /// Registers a change listener, e.g. the cart badge on the tab bar.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartSnapshot) + Send + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}
