//! # glance-config
//!
//! Layered configuration loading for Paperglance using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GLANCE_*` prefix, `__` as separator)
//! 2. Project-level `.paperglance/config.toml`
//! 3. User-level `~/.config/paperglance/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GLANCE_SERVICE__BASE_URL` -> `service.base_url`,
//! `GLANCE_SESSION__DEFAULT_LENGTH` -> `session.default_length`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use glance_config::GlanceConfig;
//!
//! let config = GlanceConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.service.base_url);
//! ```

mod error;
mod general;
mod service;
mod session;

pub use error::ConfigError;
pub use general::{ExportConfig, HistoryConfig};
pub use service::ServiceConfig;
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GlanceConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl GlanceConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".paperglance/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("GLANCE_").split("__"))
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.service.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "service".to_string(),
            });
        }
        if self.service.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "service.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.history.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.limit".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("paperglance").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GlanceConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.session.upload_on_stage);
        assert_eq!(config.history.limit, 10);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let mut config = GlanceConfig::default();
        config.history.limit = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "history.limit"));
    }

    #[test]
    fn bad_base_url_is_not_configured() {
        let mut config = GlanceConfig::default();
        config.service.base_url = "ftp://example.com".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
