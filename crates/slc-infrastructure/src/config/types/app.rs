//! Application configuration root

use serde::{Deserialize, Serialize};

use super::{CacheConfig, CrmConfig, LoggingConfig};

/// Complete application configuration
///
/// Every section falls back to its defaults, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cache store and scope settings
    pub cache: CacheConfig,

    /// Salesloft API settings
    pub crm: CrmConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}
