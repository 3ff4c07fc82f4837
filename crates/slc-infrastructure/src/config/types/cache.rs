//! Cache configuration types

use serde::{Deserialize, Serialize};
use slc_domain::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_SYSTEM_NAME};
use slc_providers::constants::{CACHE_DEFAULT_MAX_ENTRIES, REDIS_DEFAULT_URL};

/// Cache store backends
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-memory cache (Moka), private to the process
    #[default]
    Moka,
    /// Distributed cache (Redis), shared by every instance
    Redis,
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache enabled; when off every lookup goes to the CRM
    pub enabled: bool,

    /// Cache store backend
    pub provider: CacheBackend,

    /// TTL of cached lookups and scope registries, in seconds
    pub ttl_secs: u64,

    /// Maximum number of entries held by the in-memory store
    pub max_capacity: u64,

    /// Redis URL (for the Redis backend)
    pub redis_url: Option<String>,

    /// System name leading every key, e.g. "Salesloft"
    pub system_name: String,

    /// Systems whose scopes are cleared together with ours on bulk
    /// invalidation, e.g. `["Salesforce"]`
    pub linked_systems: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: CacheBackend::Moka,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_capacity: CACHE_DEFAULT_MAX_ENTRIES,
            redis_url: Some(REDIS_DEFAULT_URL.to_string()),
            system_name: DEFAULT_SYSTEM_NAME.to_string(),
            linked_systems: Vec::new(),
        }
    }
}
