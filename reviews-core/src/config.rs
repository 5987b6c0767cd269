//! Session configuration read from `config.toml`.
//!
//! Every key is optional; missing keys take the defaults below. Config problems
//! are soft failures: `load_or_default` logs them and falls back to defaults so a
//! typo never prevents startup.
//!
//! ```toml
//! page_size = 20
//! screens_ahead = 2.5
//! image_cache_capacity = 64
//! layout_cache_capacity = 256
//! error_policy = "silent"        # or "surface"
//! data_path = "data/reviews.json"
//! theme = "catppuccin-mocha"
//!
//! [latency_ms]
//! min = 100
//! max = 1000
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// What the list does with a failed page load besides reopening the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Only a state-changed notification; the error stays in `last_error`.
    #[default]
    Silent,
    /// Additionally emit `ListEvent::LoadFailed`.
    Surface,
}

/// Simulated provider latency bounds in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub min: u64,
    pub max: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self { min: 100, max: 1_000 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReviewsConfig {
    /// Reviews requested per page.
    pub page_size: usize,
    /// Viewports of remaining content that trigger the next page.
    pub screens_ahead: f64,
    pub image_cache_capacity: usize,
    /// Memoized cell layouts kept by the list controller.
    pub layout_cache_capacity: usize,
    pub latency_ms: LatencyConfig,
    pub error_policy: ErrorPolicy,
    /// JSON bundle served by the file-backed provider.
    pub data_path: PathBuf,
    pub theme: String,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            screens_ahead: 2.5,
            image_cache_capacity: 64,
            layout_cache_capacity: 256,
            latency_ms: LatencyConfig::default(),
            error_policy: ErrorPolicy::default(),
            data_path: PathBuf::from("data/reviews.json"),
            theme: "catppuccin-mocha".to_owned(),
        }
    }
}

impl ReviewsConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for malformed TOML or mistyped keys,
    /// `ConfigError::Invalid` for values outside their allowed range.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the config file at `path`.
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` when the file cannot be read, otherwise as `from_toml_str`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Like `load`, but any failure yields the defaults.
    ///
    /// A missing file is expected and not logged; other failures are logged at
    /// `warn`.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config, using defaults");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".to_owned()));
        }
        if !self.screens_ahead.is_finite() || self.screens_ahead < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "screens_ahead must be a non-negative number, got {}",
                self.screens_ahead
            )));
        }
        if self.image_cache_capacity == 0 || self.layout_cache_capacity == 0 {
            return Err(ConfigError::Invalid("cache capacities must be at least 1".to_owned()));
        }
        Ok(())
    }
}
