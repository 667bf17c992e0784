//! # Commands Module
//!
//! Every action the mobile screens can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── menu.rs     ◄─── Menu browsing, item details, option menu
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── order.rs    ◄─── Checkout quote, place order, order history
//! ├── admin.rs    ◄─── Menu CRUD, order status, analytics dashboard
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Mobile screen                                                          │
//! │  ─────────────                                                          │
//! │  const cart = await feast.addToCart({                                   │
//! │    foodItemId: '3f1c…',                                                 │
//! │    quantity: 2                                                          │
//! │  });                                                                    │
//! │         │                                                               │
//! │         │ (native bridge, JSON)                                         │
//! │         ▼                                                               │
//! │  Rust                                                                   │
//! │  ────                                                                   │
//! │  pub async fn add_to_cart(                                              │
//! │      db: &DbState,            ◄── Borrowed from the Session             │
//! │      cart: &mut CartState,    ◄── Exclusive: single writer              │
//! │      request: AddToCartRequest,                                         │
//! │  ) -> ApiResult<CartResponse>                                           │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Screen receives: { items: [...], totals: {...} }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Borrowing
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! menu::get_menu(&session.db, None).await?;
//!
//! // Only needs cart
//! cart::get_cart(&session.cart);
//!
//! // Needs all three
//! order::place_order(&session.db, &mut session.cart, &session.config, draft).await?;
//! ```

pub mod admin;
pub mod cart;
pub mod config;
pub mod menu;
pub mod order;
