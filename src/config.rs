//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FlatpathError};

/// Default upper bound for an array index accepted by `write`.
pub const DEFAULT_MAX_ARRAY_INDEX: usize = 1 << 20;

/// Largest `max_array_index` a config may carry.
pub const MAX_ARRAY_INDEX_CAP: usize = 1 << 24;

/// Tunables for a [`PathEngine`](crate::PathEngine).
///
/// Missing fields in a serialized config fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest array index `write` will materialize. Writing index `k`
    /// allocates `k + 1` slots, so this bounds the memory one path can claim.
    pub max_array_index: usize,
    /// List `null` leaves in `enumerate` output. Holes and `absent` values
    /// are never listed.
    pub enumerate_nulls: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_array_index: DEFAULT_MAX_ARRAY_INDEX,
            enumerate_nulls: false,
        }
    }
}

impl EngineConfig {
    /// Validates this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_array_index == 0 {
            return Err(ConfigError::InvalidField {
                field: "max_array_index".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_array_index > MAX_ARRAY_INDEX_CAP {
            return Err(ConfigError::InvalidField {
                field: "max_array_index".to_string(),
                reason: format!("must not exceed {MAX_ARRAY_INDEX_CAP}"),
            });
        }
        Ok(())
    }

    /// Parses and validates a config from JSON.
    pub fn from_json(s: &str) -> Result<Self, FlatpathError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
