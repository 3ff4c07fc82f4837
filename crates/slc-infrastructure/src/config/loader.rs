//! Configuration loader
//!
//! Loads configuration from defaults, a TOML file and environment variables.

use crate::config::{AppConfig, CacheBackend};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use slc_domain::constants::CACHE_KEY_SEPARATOR;
use slc_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Later sources override earlier ones:
    /// 1. `AppConfig::default()`
    /// 2. The TOML file given to [`with_config_path`](Self::with_config_path),
    ///    or the first `slc.toml` found in the default locations
    /// 3. Environment variables, nested with a double underscore
    ///    (e.g. `SLC_CACHE__TTL_SECS=120`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => log_config_loaded(config_path, false),
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing config file among the default locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_cache_config(config)?;
    validate_crm_config(config)?;
    validate_logging_config(config)?;
    Ok(())
}

fn validate_system_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::configuration("System name cannot be empty"));
    }
    if name.contains(CACHE_KEY_SEPARATOR) {
        return Err(Error::configuration(format!(
            "System name '{name}' cannot contain '{CACHE_KEY_SEPARATOR}'"
        )));
    }
    Ok(())
}

fn validate_cache_config(config: &AppConfig) -> Result<()> {
    let cache = &config.cache;
    if cache.enabled && cache.ttl_secs == 0 {
        return Err(Error::configuration(
            "Cache TTL cannot be 0 when cache is enabled",
        ));
    }
    if cache.max_capacity == 0 {
        return Err(Error::configuration("Cache capacity cannot be 0"));
    }
    if cache.enabled
        && cache.provider == CacheBackend::Redis
        && cache.redis_url.as_deref().is_none_or(str::is_empty)
    {
        return Err(Error::configuration(
            "Redis URL is required when the redis cache provider is selected",
        ));
    }
    validate_system_name(&cache.system_name)?;
    for linked in &cache.linked_systems {
        validate_system_name(linked)?;
    }
    Ok(())
}

fn validate_crm_config(config: &AppConfig) -> Result<()> {
    if config.crm.timeout_secs == 0 {
        return Err(Error::configuration("CRM request timeout cannot be 0"));
    }
    Ok(())
}

fn validate_logging_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level).map(|_| ())
}
