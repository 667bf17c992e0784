//! # State Module
//!
//! Session state for the mobile shell.
//!
//! Instead of one big struct that every command borrows whole, state is
//! split by concern. A command names exactly the pieces it touches, so
//! `get_menu` never needs the cart and `get_cart` never needs storage.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Session                                  │   │
//! │  │  (owned by the mobile shell, one per running app)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   DbState    │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Database    │  │  CartStore   │  │  store_name      │              │
//! │  │  (SQLite     │  │  (cart +     │  │  delivery fee    │              │
//! │  │   pool)      │  │  listeners)  │  │  tax rate        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • DbState: the pool is internally shared, commands take &DbState      │
//! │  • CartState: single writer, mutating commands take &mut CartState     │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod db;

pub use cart::CartState;
pub use config::ConfigState;
pub use db::DbState;
