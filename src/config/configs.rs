use anyhow::Result;
use serde::Deserialize;

use super::{defaults, envconfig::EnvConfig, validate};
use crate::logging;

/// Settings for a [`MappingContext`](crate::MappingContext).
///
/// Read from `RELMAP_SCHEMA`, `RELMAP_KEY_COLUMN_SUFFIX` and
/// `RELMAP_LOG_LEVEL` by [`EnvConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingConfig {
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default = "default_key_column_suffix")]
    pub key_column_suffix: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            schema: None,
            key_column_suffix: default_key_column_suffix(),
            log_level: default_log_level(),
        }
    }
}

impl MappingConfig {
    /// Installs the fmt subscriber at `log_level`; `RUST_LOG` still wins when set.
    pub fn init_tracing(&self) {
        logging::init_tracing(&self.log_level);
    }
}

impl EnvConfig for MappingConfig {
    const PREFIX: &'static str = "RELMAP";

    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

fn default_key_column_suffix() -> String {
    defaults::DEFAULT_KEY_COLUMN_SUFFIX.to_string()
}

fn default_log_level() -> String {
    defaults::DEFAULT_LOG_LEVEL.to_string()
}
