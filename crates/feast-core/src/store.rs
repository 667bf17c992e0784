//! # Cart Store
//!
//! Owns the session's [`Cart`] and pushes a fresh [`CartSnapshot`] to every
//! subscriber after each mutation.
//!
//! ```text
//! ┌──────────────┐   &mut self    ┌──────────────┐   snapshot   ┌──────────────┐
//! │   command    │ ─────────────► │  CartStore   │ ───────────► │  listeners   │
//! │ (app layer)  │                │  └── Cart    │              │ (badge, UI)  │
//! └──────────────┘                └──────────────┘              └──────────────┘
//! ```
//!
//! Single writer: the store is a plain owned value mutated through
//! `&mut self`, so there is nothing to lock.

use std::fmt;

use tracing::trace;

use crate::cart::{Cart, CartAction, CartAggregate, CartLineItem, CartSnapshot};

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartSnapshot) + Send>;

/// Cart plus change listeners.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener called with the new snapshot after every
    /// mutation. It is not called for the current state.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartSnapshot) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    pub fn add_item(&mut self, line: CartLineItem) {
        self.cart.add_item(line);
        self.notify();
    }

    pub fn remove_item(&mut self, id: &str) {
        self.cart.remove_item(id);
        self.notify();
    }

    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        self.cart.update_quantity(id, quantity);
        self.notify();
    }

    pub fn update_cart_item(&mut self, line: CartLineItem) {
        self.cart.update_cart_item(line);
        self.notify();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.notify();
    }

    pub fn dispatch(&mut self, action: CartAction) {
        self.cart.apply(action);
        self.notify();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    pub fn aggregate(&self) -> CartAggregate {
        self.cart.aggregate()
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }

        let snapshot = self.cart.snapshot();
        trace!(listeners = self.listeners.len(), total_items = snapshot.totals.total_items, "Notifying cart listeners");

        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
