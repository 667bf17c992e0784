//! # Menu
//!
//! Menu helpers for the browse screens and the admin menu editor.
//!
//! ```text
//! list_all ──► available() ──► search("burger") ──► group_by_category()
//!                                                    ├── Starters [..]
//!                                                    ├── Mains    [..]
//!                                                    └── Burgers  [..]
//! ```
//!
//! Writes go through [`NewFoodItem`] and [`FoodItemPatch`], which validate
//! before anything reaches storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::types::{Category, FoodItem};
use crate::validation::{
    validate_description, validate_food_name, validate_price_cents, validate_search_query,
    ValidationResult,
};

// =============================================================================
// Browsing
// =============================================================================

/// One category heading with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuSection {
    pub category: Category,
    pub items: Vec<FoodItem>,
}

/// Groups items under their category in [`Category::ALL`] order. Categories
/// without items are left out; item order within a section is preserved.
pub fn group_by_category(items: &[FoodItem]) -> Vec<MenuSection> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let section: Vec<FoodItem> = items
                .iter()
                .filter(|i| i.category == category)
                .cloned()
                .collect();

            (!section.is_empty()).then(|| MenuSection {
                category,
                items: section,
            })
        })
        .collect()
}

/// Items the kitchen currently offers.
pub fn available(items: &[FoodItem]) -> Vec<FoodItem> {
    items.iter().filter(|i| i.available).cloned().collect()
}

/// Case-insensitive name/description search. A blank query matches all.
pub fn search(items: &[FoodItem], query: &str) -> ValidationResult<Vec<FoodItem>> {
    let query = validate_search_query(query)?.to_lowercase();

    if query.is_empty() {
        return Ok(items.to_vec());
    }

    Ok(items
        .iter()
        .filter(|i| {
            i.name.to_lowercase().contains(&query) || i.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect())
}

// =============================================================================
// Admin Input
// =============================================================================

/// Admin input for a new menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewFoodItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub category: Category,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl NewFoodItem {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_food_name(&self.name)?;
        validate_description(&self.description)?;
        validate_price_cents(self.price_cents)?;
        Ok(())
    }

    /// Validates and stamps a fresh id and timestamps.
    pub fn into_food_item(self, now: DateTime<Utc>) -> ValidationResult<FoodItem> {
        self.validate()?;

        Ok(FoodItem {
            id: Uuid::new_v4().to_string(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price_cents: self.price_cents,
            category: self.category,
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
            available: self.available,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update of a menu item. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FoodItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl FoodItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == FoodItemPatch::default()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_food_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(price) = self.price_cents {
            validate_price_cents(price)?;
        }
        Ok(())
    }

    /// Validates, then writes the present fields into `item`.
    pub fn apply_to(&self, item: &mut FoodItem, now: DateTime<Utc>) -> ValidationResult<()> {
        self.validate()?;

        if let Some(name) = &self.name {
            item.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            item.description = description.trim().to_string();
        }
        if let Some(price) = self.price_cents {
            item.price_cents = price;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(url) = &self.image_url {
            // An empty string clears the image
            item.image_url = Some(url.trim().to_string()).filter(|u| !u.is_empty());
        }
        if let Some(available) = self.available {
            item.available = available;
        }

        item.updated_at = now;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
