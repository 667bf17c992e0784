//! # feast-core: Pure Business Logic for Feast
//!
//! The cart, pricing and ordering rules of the Feast food-ordering app, as
//! pure functions with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Feast Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI                                    │   │
//! │  │    Menu ──► Customize ──► Cart ──► Checkout ──► My Orders       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    feast-app (Session + commands)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ feast-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐ ┌───────────┐ ┌───────────┐ ┌───────────┐    │   │
//! │  │   │customization│ │  pricing  │ │ cart/store│ │ checkout  │    │   │
//! │  │   │ sides ≤ 2   │ │ line total│ │ CartStore │ │ quote     │    │   │
//! │  │   │ drinks/extra│ │           │ │ CartAction│ │ OrderDraft│    │   │
//! │  │   └─────────────┘ └───────────┘ └───────────┘ └───────────┘    │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────┐      │   │
//! │  │   │   order   │ │ analytics │ │   menu    │ │ validation│      │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘ └───────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    feast-db (Storage Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - FoodItem, Category, TaxRate
//! - [`customization`] - Per-line choices and the house option menu
//! - [`pricing`] - Line total calculator
//! - [`cart`] - Cart state and its transitions
//! - [`store`] - Cart owner with change subscriptions
//! - [`checkout`] - Quotes and order drafts
//! - [`order`] - Orders and the status machine
//! - [`analytics`] - Dashboard aggregations
//! - [`menu`] - Menu browsing and admin input
//! - [`validation`] - Field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use feast_core::cart::CartLineItem;
//! use feast_core::customization::CustomizationSelection;
//! use feast_core::money::Money;
//! use feast_core::store::CartStore;
//! # use feast_core::types::{Category, FoodItem};
//! # let burger = FoodItem {
//! #     id: "food-1".into(), name: "Beef Burger".into(), description: String::new(),
//! #     price_cents: 5000, category: Category::Burgers, image_url: None, available: true,
//! #     created_at: chrono::Utc::now(), updated_at: chrono::Utc::now(),
//! # };
//!
//! let mut selection = CustomizationSelection::new();
//! selection.set_drink("Coke", Money::from_cents(1500), true).unwrap();
//! selection.set_extra("Cheese", Money::from_cents(800), true).unwrap();
//!
//! let mut store = CartStore::new();
//! store.add_item(CartLineItem::new(burger, 2, selection));
//!
//! assert_eq!(store.aggregate().total_price.to_string(), "R146.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod customization;
pub mod error;
pub mod menu;
pub mod money;
pub mod order;
pub mod pricing;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAction, CartAggregate, CartLineItem, CartSnapshot};
pub use checkout::{CheckoutPolicy, CheckoutQuote, OrderDraft};
pub use customization::{CustomizationMenu, CustomizationSelection, SideToggle};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderItem, OrderStatus, PaymentStatus};
pub use store::{CartStore, SubscriptionId};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of free sides per cart line.
pub const MAX_SIDES: usize = 2;

/// Maximum quantity accepted from the item screen.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Flat delivery fee: R15.00.
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 1500;

/// VAT, 15%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1500;

pub const MAX_NAME_LENGTH: usize = 100;

pub const MAX_DESCRIPTION_LENGTH: usize = 500;

pub const MAX_ADDRESS_LENGTH: usize = 300;
