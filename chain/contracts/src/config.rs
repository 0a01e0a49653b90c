//! Contract configuration
//!
//! Bounds for administrator-set rates and the commission a fresh contract
//! starts with. Loadable from JSON; any omitted field keeps its default.

use serde::{Deserialize, Serialize};
use types::numeric::BasisPoints;

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangerConfig {
    /// Highest rate `add_token` / `change_token_rate` accept.
    pub max_rate_bps: BasisPoints,
    /// Highest commission `change_commission` accepts.
    pub max_commission_bps: BasisPoints,
    /// Commission applied until the first `change_commission`.
    pub initial_commission_bps: BasisPoints,
}

impl Default for ChangerConfig {
    fn default() -> Self {
        Self {
            max_rate_bps: BasisPoints::FULL,
            max_commission_bps: BasisPoints::FULL,
            initial_commission_bps: BasisPoints::ZERO,
        }
    }
}

impl ChangerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rate_bps > BasisPoints::FULL {
            return Err(ConfigError::Invalid(format!(
                "max_rate_bps {} exceeds {}",
                self.max_rate_bps,
                BasisPoints::FULL
            )));
        }
        if self.max_commission_bps > BasisPoints::FULL {
            return Err(ConfigError::Invalid(format!(
                "max_commission_bps {} exceeds {}",
                self.max_commission_bps,
                BasisPoints::FULL
            )));
        }
        if self.initial_commission_bps > self.max_commission_bps {
            return Err(ConfigError::Invalid(format!(
                "initial_commission_bps {} exceeds max_commission_bps {}",
                self.initial_commission_bps, self.max_commission_bps
            )));
        }
        Ok(())
    }
}
