//! # Domain Types
//!
//! Menu-side domain types shared by every layer of Feast.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    FoodItem     │   │    Category     │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  Starters       │   │  bps (u32)      │       │
//! │  │  name           │   │  Mains          │   │  1500 = 15%     │       │
//! │  │  price_cents    │   │  Desserts  ...  │   └─────────────────┘       │
//! │  │  category       │   └─────────────────┘                              │
//! │  │  available      │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order types live in [`crate::order`], cart types in [`crate::cart`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bps = 0.01%).
///
/// South African VAT is 15%, i.e. 1500 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Category
// =============================================================================

/// Menu category.
///
/// Stored and serialized by its display name ("Starters", "Mains", ...),
/// which is what the menu screens group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum Category {
    Starters,
    Mains,
    Desserts,
    Beverages,
    Alcohol,
    Burgers,
}

impl Category {
    /// All categories, in menu display order.
    pub const ALL: [Category; 6] = [
        Category::Starters,
        Category::Mains,
        Category::Desserts,
        Category::Beverages,
        Category::Alcohol,
        Category::Burgers,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Starters => "Starters",
            Category::Mains => "Mains",
            Category::Desserts => "Desserts",
            Category::Beverages => "Beverages",
            Category::Alcohol => "Alcohol",
            Category::Burgers => "Burgers",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Starters
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parses a category name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Food Item
// =============================================================================

/// A menu item as fetched from the menu store.
///
/// Immutable once fetched: carts hold a snapshot of it, so later menu edits
/// never reprice a line that is already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FoodItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    pub description: String,

    /// Base price in cents, before any customization.
    pub price_cents: i64,

    pub category: Category,

    /// Image reference (URL or storage path).
    pub image_url: Option<String>,

    /// Whether the kitchen currently offers this item.
    pub available: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl FoodItem {
    /// Returns the base price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
