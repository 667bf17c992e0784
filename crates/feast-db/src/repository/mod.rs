//! # Repository Module
//!
//! Storage access for Feast, one repository per table.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  App command                                                           │
//! │       │                                                                 │
//! │       │  db.orders().list_by_user("user-1")                            │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── insert(&self, order)                                              │
//! │  ├── list_all / list_by_user                                           │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── update_status(&self, id, status)                                  │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`FoodItemRepository`](food_item::FoodItemRepository) - Menu CRUD
//! - [`OrderRepository`](order::OrderRepository) - Orders and status updates

pub mod food_item;
pub mod order;
