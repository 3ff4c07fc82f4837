//! Cache provider factory
//!
//! Creates cache store instances from configuration.

use std::sync::Arc;

use slc_domain::error::Result;
use slc_domain::ports::providers::CacheProvider;
use slc_providers::cache::{MokaCacheProvider, NullCacheProvider, RedisCacheProvider};
use slc_providers::constants::REDIS_DEFAULT_URL;
use tracing::info;

use crate::config::{CacheBackend, CacheConfig};

/// Cache store shared by every scope of the process
pub type SharedCacheProvider = Arc<dyn CacheProvider>;

/// Cache provider factory
#[derive(Debug, Clone, Copy)]
pub struct CacheProviderFactory;

impl CacheProviderFactory {
    /// Create a cache provider from configuration
    ///
    /// A disabled cache yields the null store, so every lookup reaches the
    /// CRM while the caching client keeps its usual shape.
    pub fn create_from_config(config: &CacheConfig) -> Result<SharedCacheProvider> {
        if !config.enabled {
            info!("Cache disabled, using null store");
            return Ok(Self::create_null());
        }

        let provider = match config.provider {
            CacheBackend::Moka => Self::create_moka(config.max_capacity),
            CacheBackend::Redis => {
                Self::create_redis(config.redis_url.as_deref().unwrap_or(REDIS_DEFAULT_URL))?
            }
        };
        info!(provider = provider.provider_name(), "Cache store ready");
        Ok(provider)
    }

    /// Create a Moka cache provider
    pub fn create_moka(max_entries: u64) -> SharedCacheProvider {
        Arc::new(MokaCacheProvider::with_capacity(max_entries))
    }

    /// Create a Redis cache provider
    ///
    /// No connection is opened until the first command.
    pub fn create_redis(connection_string: &str) -> Result<SharedCacheProvider> {
        Ok(Arc::new(RedisCacheProvider::new(connection_string)?))
    }

    /// Create a null cache provider
    pub fn create_null() -> SharedCacheProvider {
        Arc::new(NullCacheProvider::new())
    }
}
