//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current store configuration.
///
/// ## When Used
/// - App startup (header, currency formatting)
/// - Checkout screen (delivery fee and VAT labels)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
