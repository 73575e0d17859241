//! Client configuration.
//!
//! Every field has a default, so an empty document is a valid config and
//! hosts only spell out what they override (usually `base_url` when pointing
//! at the mock server).

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_LANGUAGE: &str = "en";
/// Highest national dex number the home screen rolls for.
pub const DEFAULT_RANDOM_ID_MAX: u32 = 898;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_size: u32,
    pub language: String,
    pub random_id_max: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            language: DEFAULT_LANGUAGE.to_string(),
            random_id_max: DEFAULT_RANDOM_ID_MAX,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.random_id_max == 0 {
            return Err(ConfigError::Invalid {
                field: "random_id_max",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
