//! Configuration loading
//!
//! Merges configuration from defaults, an optional TOML file, and
//! `MINTSTORE_`-prefixed environment variables (later sources override
//! earlier ones), then validates the result.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use mintstore_domain::error::{Error, Result};
use mintstore_domain::{StoreConfig, StoreProviderKind};
use std::path::{Path, PathBuf};

/// Default environment variable prefix
pub const CONFIG_ENV_PREFIX: &str = "MINTSTORE";

/// Configuration loader service
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later overrides earlier):
    /// 1. `StoreConfig::default()`
    /// 2. TOML configuration file, if one was set and exists
    /// 3. Environment variables (e.g. `MINTSTORE_HERD_TIMEOUT_SECS`)
    pub fn load(&self) -> Result<StoreConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(StoreConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
            }
        }

        let prefix = self.env_prefix.as_deref().unwrap_or(CONFIG_ENV_PREFIX);
        figment = figment.merge(Env::prefixed(&format!("{prefix}_")));

        let config: StoreConfig = figment
            .extract()
            .map_err(|e| Error::configuration_with_source("Failed to extract configuration", e))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate a configuration
    pub fn validate(config: &StoreConfig) -> Result<()> {
        if config.provider == StoreProviderKind::Redis && config.redis_url.is_none() {
            return Err(Error::configuration(
                "redis provider selected but no redis_url configured",
            ));
        }
        if config.herd && config.herd_timeout_secs == 0 {
            return Err(Error::configuration(
                "herd protection requires a nonzero herd_timeout_secs",
            ));
        }
        if config.max_value_bytes == 0 {
            return Err(Error::configuration("max_value_bytes must be nonzero"));
        }
        Ok(())
    }
}
