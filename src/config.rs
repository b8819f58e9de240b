//! Bridge configuration

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default outbound event channel capacity
const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Tuning knobs for the bridge
///
/// All fields have working defaults; hosts that do not care can use
/// `BridgeConfig::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Outbound `BridgeEvent` broadcast capacity
    ///
    /// Slow subscribers past this depth see lagged receives and miss events;
    /// they can resynchronize from the snapshot at any time.
    pub event_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl BridgeConfig {
    /// Parse configuration from TOML text
    ///
    /// Missing keys fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}
