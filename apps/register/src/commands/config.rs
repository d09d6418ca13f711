//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Returns the register configuration (shop profile, currency, tax rate).
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
