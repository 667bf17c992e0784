//! # Pricing Calculator
//!
//! Turns a base price, a quantity and a customization into a line total.
//!
//! ```text
//! total = (base + Σ included drinks + Σ selected extras) × quantity
//! ```
//!
//! Sides are complimentary and removed ingredients are not discounted, so
//! neither appears in the formula. Every function here is pure: identical
//! input always yields identical output.
//!
//! A price below zero is charged as zero, so a total is never negative.

use crate::customization::CustomizationSelection;
use crate::money::Money;

/// Clamps a quantity to the smallest orderable amount (1).
#[inline]
pub const fn clamp_quantity(quantity: u32) -> u32 {
    if quantity == 0 {
        1
    } else {
        quantity
    }
}

/// Sum of the prices of all picked drinks and extras.
pub fn add_ons_total(selection: &CustomizationSelection) -> Money {
    selection
        .included_drinks()
        .chain(selection.selected_extras())
        .map(|choice| chargeable(choice.price))
        .sum()
}

/// Price of one unit: base plus add-ons.
pub fn unit_price(base_price: Money, selection: &CustomizationSelection) -> Money {
    chargeable(base_price) + add_ons_total(selection)
}

#[inline]
fn chargeable(price: Money) -> Money {
    price.max(Money::zero())
}

/// Line total for `quantity` units. A quantity of 0 is priced as 1.
///
/// ## Example
/// ```rust
/// use feast_core::customization::CustomizationSelection;
/// use feast_core::money::Money;
/// use feast_core::pricing::line_total;
///
/// let mut selection = CustomizationSelection::new();
/// selection.set_drink("Coke", Money::from_cents(1500), true).unwrap();
/// selection.set_extra("Cheese", Money::from_cents(800), true).unwrap();
///
/// let total = line_total(Money::from_cents(5000), 2, &selection);
/// assert_eq!(total.cents(), 14600); // (50 + 15 + 8) × 2
/// ```
pub fn line_total(base_price: Money, quantity: u32, selection: &CustomizationSelection) -> Money {
    unit_price(base_price, selection).multiply_quantity(clamp_quantity(quantity))
}

// =============================================================================
// Unit Tests
// =============================================================================
