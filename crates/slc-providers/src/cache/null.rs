//! Null cache provider
//!
//! A cache provider implementation that doesn't store anything.
//! Used when caching is disabled in configuration.

use async_trait::async_trait;
use slc_domain::error::Result;
use slc_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider, CacheStats};

/// Null cache provider that doesn't store anything
///
/// Always misses on reads and accepts writes without storing them, so a
/// caching client backed by it always reaches the CRM.
///
/// # Example
///
/// ```rust
/// use slc_providers::cache::NullCacheProvider;
///
/// let provider = NullCacheProvider::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheProvider for NullCacheProvider {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats::new())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
