//! # Item Customization
//!
//! What a customer picks on the item screen before adding it to the cart.
//!
//! ## Selection Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Section        Choice             Price effect     Limit               │
//! │  ─────────────  ─────────────────  ───────────────  ──────────────────  │
//! │  Sides          pick by name       free             at most 2           │
//! │  Drinks         include/exclude    + unit price     none                │
//! │  Extras         select/deselect    + unit price     none                │
//! │  Ingredients    remove/restore     none             none                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Picking a third side is refused without changing the selection. That is
//! an outcome ([`SideToggle::LimitReached`]), not an error.
//!
//! A selection arriving as JSON goes through the same rules: more than
//! [`MAX_SIDES`] sides or a negative drink or extra price fails
//! deserialization. Prices the client sent are still only a request;
//! [`CustomizationMenu::price_selection`] rebuilds the selection with the
//! menu's own prices.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_non_negative, ValidationResult};
use crate::MAX_SIDES;

// =============================================================================
// Priced Choice
// =============================================================================

/// A drink or extra offered with a unit price, and whether it is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedChoice {
    pub name: String,
    pub price: Money,
    pub selected: bool,
}

impl PricedChoice {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        PricedChoice {
            name: name.into(),
            price,
            selected: false,
        }
    }
}

/// Result of trying to pick or unpick a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideToggle {
    Added,
    Removed,
    /// Already at [`MAX_SIDES`]; the selection is unchanged.
    LimitReached,
}

// =============================================================================
// Customization Selection
// =============================================================================

/// The customization attached to one cart line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "SelectionInput")]
#[ts(export)]
pub struct CustomizationSelection {
    /// Selected sides, in the order they were picked.
    sides: Vec<String>,

    /// Offered drinks with their inclusion flag.
    drinks: Vec<PricedChoice>,

    /// Offered extras with their selection flag.
    extras: Vec<PricedChoice>,

    /// Base ingredients the customer asked to leave out.
    removed_ingredients: Vec<String>,
}

impl CustomizationSelection {
    /// An empty selection: no sides, no drinks or extras on offer, nothing removed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh selection for the given option menu: every drink and extra is
    /// offered but unpicked, no side is picked and no ingredient removed.
    pub fn from_menu(menu: &CustomizationMenu) -> Self {
        CustomizationSelection {
            sides: Vec::new(),
            drinks: menu.drinks.clone(),
            extras: menu.extras.clone(),
            removed_ingredients: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Sides
    // -------------------------------------------------------------------------

    /// Picks a side. Refused once [`MAX_SIDES`] are picked.
    pub fn select_side(&mut self, name: &str) -> SideToggle {
        if self.has_side(name) {
            return SideToggle::Added;
        }
        if self.sides.len() >= MAX_SIDES {
            return SideToggle::LimitReached;
        }
        self.sides.push(name.to_string());
        SideToggle::Added
    }

    /// Flips a side. Unpicking always succeeds; picking obeys the limit.
    pub fn toggle_side(&mut self, name: &str) -> SideToggle {
        if self.has_side(name) {
            self.sides.retain(|s| s != name);
            SideToggle::Removed
        } else {
            self.select_side(name)
        }
    }

    pub fn has_side(&self, name: &str) -> bool {
        self.sides.iter().any(|s| s == name)
    }

    pub fn sides(&self) -> &[String] {
        &self.sides
    }

    // -------------------------------------------------------------------------
    // Drinks & Extras
    // -------------------------------------------------------------------------

    /// Offers a drink (replacing any offer with the same name) and sets
    /// whether it is included.
    ///
    /// ## Errors
    /// [`ValidationError::MustBeNonNegative`] for a negative price; the
    /// selection is left unchanged.
    pub fn set_drink(&mut self, name: &str, price: Money, included: bool) -> ValidationResult<()> {
        validate_non_negative("drink price", price.cents())?;
        upsert_choice(&mut self.drinks, name, price, included);
        Ok(())
    }

    /// Flips a drink by name. Returns false when no such drink is on offer.
    pub fn toggle_drink(&mut self, name: &str) -> bool {
        toggle_choice(&mut self.drinks, name)
    }

    /// Same as [`set_drink`](Self::set_drink), for extras.
    pub fn set_extra(&mut self, name: &str, price: Money, selected: bool) -> ValidationResult<()> {
        validate_non_negative("extra price", price.cents())?;
        upsert_choice(&mut self.extras, name, price, selected);
        Ok(())
    }

    /// Flips an extra by name. Returns false when no such extra is on offer.
    pub fn toggle_extra(&mut self, name: &str) -> bool {
        toggle_choice(&mut self.extras, name)
    }

    pub fn drinks(&self) -> &[PricedChoice] {
        &self.drinks
    }

    pub fn extras(&self) -> &[PricedChoice] {
        &self.extras
    }

    pub fn included_drinks(&self) -> impl Iterator<Item = &PricedChoice> {
        self.drinks.iter().filter(|d| d.selected)
    }

    pub fn selected_extras(&self) -> impl Iterator<Item = &PricedChoice> {
        self.extras.iter().filter(|e| e.selected)
    }

    // -------------------------------------------------------------------------
    // Ingredients
    // -------------------------------------------------------------------------

    /// Leaves an ingredient out. Idempotent.
    pub fn remove_ingredient(&mut self, name: &str) {
        if !self.is_removed(name) {
            self.removed_ingredients.push(name.to_string());
        }
    }

    pub fn restore_ingredient(&mut self, name: &str) {
        self.removed_ingredients.retain(|i| i != name);
    }

    /// Flips an ingredient between kept and removed. Returns true when the
    /// ingredient is now removed.
    pub fn toggle_ingredient(&mut self, name: &str) -> bool {
        if self.is_removed(name) {
            self.restore_ingredient(name);
            false
        } else {
            self.remove_ingredient(name);
            true
        }
    }

    pub fn is_removed(&self, name: &str) -> bool {
        self.removed_ingredients.iter().any(|i| i == name)
    }

    pub fn removed_ingredients(&self) -> &[String] {
        &self.removed_ingredients
    }

    // -------------------------------------------------------------------------
    // Summaries
    // -------------------------------------------------------------------------

    /// Human-readable lines for cart and order views, e.g.
    /// `["Sides: Pap, Chips", "Extras: Cheese", "No: Onion"]`.
    /// Empty sections are omitted.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.sides.is_empty() {
            lines.push(format!("Sides: {}", self.sides.join(", ")));
        }

        let drinks: Vec<&str> = self.included_drinks().map(|d| d.name.as_str()).collect();
        if !drinks.is_empty() {
            lines.push(format!("Drinks: {}", drinks.join(", ")));
        }

        let extras: Vec<&str> = self.selected_extras().map(|e| e.name.as_str()).collect();
        if !extras.is_empty() {
            lines.push(format!("Extras: {}", extras.join(", ")));
        }

        if !self.removed_ingredients.is_empty() {
            lines.push(format!("No: {}", self.removed_ingredients.join(", ")));
        }

        lines
    }
}

/// Wire shape of [`CustomizationSelection`]. Every field is replayed through
/// the selection's own setters, so JSON cannot reach a state the methods
/// refuse.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionInput {
    #[serde(default)]
    sides: Vec<String>,
    #[serde(default)]
    drinks: Vec<PricedChoice>,
    #[serde(default)]
    extras: Vec<PricedChoice>,
    #[serde(default)]
    removed_ingredients: Vec<String>,
}

impl TryFrom<SelectionInput> for CustomizationSelection {
    type Error = ValidationError;

    fn try_from(input: SelectionInput) -> Result<Self, Self::Error> {
        let mut selection = CustomizationSelection::new();

        for side in &input.sides {
            if selection.select_side(side) == SideToggle::LimitReached {
                return Err(ValidationError::OutOfRange {
                    field: "sides".to_string(),
                    min: 0,
                    max: MAX_SIDES as i64,
                });
            }
        }
        for drink in input.drinks {
            selection.set_drink(&drink.name, drink.price, drink.selected)?;
        }
        for extra in input.extras {
            selection.set_extra(&extra.name, extra.price, extra.selected)?;
        }
        for ingredient in &input.removed_ingredients {
            selection.remove_ingredient(ingredient);
        }

        Ok(selection)
    }
}

fn upsert_choice(choices: &mut Vec<PricedChoice>, name: &str, price: Money, selected: bool) {
    match choices.iter_mut().find(|c| c.name == name) {
        Some(choice) => {
            choice.price = price;
            choice.selected = selected;
        }
        None => choices.push(PricedChoice {
            name: name.to_string(),
            price,
            selected,
        }),
    }
}

fn toggle_choice(choices: &mut [PricedChoice], name: &str) -> bool {
    match choices.iter_mut().find(|c| c.name == name) {
        Some(choice) => {
            choice.selected = !choice.selected;
            true
        }
        None => false,
    }
}

// =============================================================================
// Customization Menu
// =============================================================================

/// The options offered on the item screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomizationMenu {
    /// Free sides; pick up to [`MAX_SIDES`].
    pub sides: Vec<String>,
    pub drinks: Vec<PricedChoice>,
    pub extras: Vec<PricedChoice>,
    /// Ingredients that come with the item and may be removed.
    pub ingredients: Vec<String>,
}

impl CustomizationMenu {
    /// Rebuilds `requested` from this menu: the same sides, drinks, extras and
    /// removed ingredients, but every price taken from the menu.
    ///
    /// ## Errors
    /// [`ValidationError::NotAllowed`] when the request names a side, drink,
    /// extra or ingredient this menu does not offer.
    pub fn price_selection(
        &self,
        requested: &CustomizationSelection,
    ) -> ValidationResult<CustomizationSelection> {
        let mut selection = CustomizationSelection::from_menu(self);

        for side in requested.sides() {
            if !self.sides.contains(side) {
                return Err(not_offered("sides", self.sides.iter()));
            }
            selection.select_side(side);
        }

        for drink in requested.included_drinks() {
            if !selection.toggle_drink(&drink.name) {
                return Err(not_offered("drinks", self.drinks.iter().map(|d| &d.name)));
            }
        }

        for extra in requested.selected_extras() {
            if !selection.toggle_extra(&extra.name) {
                return Err(not_offered("extras", self.extras.iter().map(|e| &e.name)));
            }
        }

        for ingredient in requested.removed_ingredients() {
            if !self.ingredients.contains(ingredient) {
                return Err(not_offered("removedIngredients", self.ingredients.iter()));
            }
            selection.remove_ingredient(ingredient);
        }

        Ok(selection)
    }
}

fn not_offered<'a>(field: &str, offered: impl Iterator<Item = &'a String>) -> ValidationError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: offered.cloned().collect(),
    }
}

impl Default for CustomizationMenu {
    /// The house option menu.
    fn default() -> Self {
        let priced = |name: &str, rand: i64| PricedChoice::new(name, Money::from_major_minor(rand, 0));

        CustomizationMenu {
            sides: ["Pap", "Chips", "Salad", "Rice", "Vegetables"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            drinks: vec![
                priced("Coke", 15),
                priced("Fanta", 15),
                priced("Sprite", 15),
                priced("Water", 10),
                priced("Juice", 20),
            ],
            extras: vec![
                priced("Extra Chips", 12),
                priced("Extra Salad", 15),
                priced("Cheese", 8),
                priced("Bacon", 15),
                priced("Avocado", 18),
                priced("Extra Sauce", 5),
            ],
            ingredients: ["Lettuce", "Tomato", "Onion", "Pickles", "Cheese"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
