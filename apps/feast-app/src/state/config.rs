//! # Configuration State
//!
//! Store settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`FEAST_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup.

use serde::{Deserialize, Serialize};
use tracing::warn;

use feast_core::validation::validate_tax_rate_bps;
use feast_core::{
    CheckoutPolicy, Money, TaxRate, DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_TAX_RATE_BPS,
};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the app header and on order confirmations
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Flat fee added to every order
    pub delivery_fee_cents: i64,

    /// VAT in basis points, e.g. 1500 = 15%
    pub tax_rate_bps: u32,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Feast"
    /// - Currency: ZAR (R)
    /// - Delivery fee: R15.00
    /// - Tax: 15%
    fn default() -> Self {
        ConfigState {
            store_name: "Feast".to_string(),
            currency_code: "ZAR".to_string(),
            currency_symbol: "R".to_string(),
            currency_decimals: 2,
            delivery_fee_cents: DEFAULT_DELIVERY_FEE_CENTS,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `FEAST_STORE_NAME`: Override store name
    /// - `FEAST_DELIVERY_FEE_CENTS`: Override delivery fee (e.g. "2000")
    /// - `FEAST_TAX_RATE`: Override tax rate as a percentage (e.g. "15")
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an explicit variable lookup.
    /// Values that do not parse are ignored with a warning.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("FEAST_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(fee) = lookup("FEAST_DELIVERY_FEE_CENTS") {
            match fee.trim().parse::<i64>() {
                Ok(cents) if cents >= 0 => config.delivery_fee_cents = cents,
                _ => warn!(value = %fee, "Ignoring invalid FEAST_DELIVERY_FEE_CENTS"),
            }
        }

        if let Some(rate) = lookup("FEAST_TAX_RATE") {
            let bps = rate
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|pct| pct.is_finite() && *pct >= 0.0)
                .map(|pct| TaxRate::from_percentage(pct).bps())
                .filter(|bps| validate_tax_rate_bps(*bps).is_ok());

            match bps {
                Some(bps) => config.tax_rate_bps = bps,
                None => warn!(value = %rate, "Ignoring invalid FEAST_TAX_RATE"),
            }
        }

        config
    }

    /// Fees applied at checkout.
    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            delivery_fee: Money::from_cents(self.delivery_fee_cents),
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
        }
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "R12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (cents / divisor).abs();
        let frac = (cents % divisor).abs();
        let sign = if cents < 0 { "-" } else { "" };

        if self.currency_decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                whole,
                frac,
                width = self.currency_decimals as usize
            )
        } else {
            format!("{}{}{}", sign, self.currency_symbol, whole)
        }
    }
}
