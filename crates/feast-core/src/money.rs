//! # Money Module
//!
//! Provides the `Money` type for menu prices, cart totals and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A cart total that drifts by a fraction of a cent after a few           │
//! │  quantity changes no longer equals the sum of its lines.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    R50.00 + R15.00 + R8.00 = 7300 cents, × 2 = 14600 cents             │
//! │    Exact, every time, in any order.                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use feast_core::money::Money;
//!
//! let burger = Money::from_cents(5000); // R50.00
//! let coke = Money::from_cents(1500);   // R15.00
//!
//! let line = (burger + coke).multiply_quantity(2);
//! assert_eq!(line.cents(), 13000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// FoodItem.price ──┬──► pricing::line_total ──► CartLineItem.total_price
///                  │                                    │
///                  │                                    ▼
///                  │                         CartAggregate.total_price
///                  │                                    │
///                  └──► shown as "R50.00"               ▼
///                                            CheckoutQuote ──► Order.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use feast_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (rand and cents).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -R5.50.
    ///
    /// ```rust
    /// use feast_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(50, 0).cents(), 5000);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rand) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion, always 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half up to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    ///
    /// ```rust
    /// use feast_core::money::Money;
    /// use feast_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(14600); // R146.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1500)); // 15% VAT
    /// assert_eq!(tax.cents(), 2190);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so very large amounts cannot overflow the intermediate product
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies by a line quantity.
    ///
    /// ```rust
    /// use feast_core::money::Money;
    ///
    /// let unit = Money::from_cents(7300);
    /// assert_eq!(unit.multiply_quantity(2).cents(), 14600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount the way the menu screens do ("R12.34").
///
/// Locale-aware formatting lives in the app layer's `ConfigState`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing line totals into an aggregate.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
