//! Engine configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Engine configuration
///
/// Loaded from TOML or built in code. Every field has a default, so an
/// empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Calendar years between packaging and expiry
    pub shelf_life_years: u32,
    /// Prefix of generated batch numbers
    pub batch_prefix: String,
    /// Note on the synthetic planting stage seeded into every new plant
    pub planting_note: String,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_shelf_life_years(mut self, years: u32) -> Self {
        self.shelf_life_years = years;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_batch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.batch_prefix = prefix.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_planting_note(mut self, note: impl Into<String>) -> Self {
        self.planting_note = note.into();
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the document is malformed or invalid
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns [`ConfigError`] describing the first invalid field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shelf_life_years == 0 {
            return Err(ConfigError::ZeroShelfLife);
        }
        if self.batch_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyBatchPrefix);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shelf_life_years: 1,
            batch_prefix: "BATCH".to_string(),
            planting_note: "Planted".to_string(),
        }
    }
}
