//! Cache Provider Port
//!
//! Port for cache store backends. Supports in-memory (Moka), distributed
//! (Redis), and null providers for testing or disabling the cache.
//!
//! The store is shared by every scope; providers know nothing about scopes
//! and only see fully qualified keys.

use crate::constants::DEFAULT_CACHE_TTL_SECS;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache Entry Configuration
///
/// Configures how a cache entry should be stored.
///
/// # Example
///
/// ```
/// use slc_domain::ports::providers::cache::CacheEntryConfig;
/// use std::time::Duration;
///
/// let config = CacheEntryConfig::default().with_ttl_secs(60);
/// assert_eq!(config.effective_ttl(), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryConfig {
    /// Time to live for the cache entry
    pub ttl: Option<Duration>,
}

impl CacheEntryConfig {
    /// Create a new cache entry config with default TTL
    pub fn new() -> Self {
        Self {
            ttl: Some(Duration::from_secs(DEFAULT_CACHE_TTL_SECS)),
        }
    }

    /// Set the TTL for the cache entry
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set TTL in seconds
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = Some(Duration::from_secs(secs));
        self
    }

    /// Get the effective TTL, falling back to default
    pub fn effective_ttl(&self) -> Duration {
        self.ttl
            .unwrap_or(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

impl Default for CacheEntryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache Operation Statistics
///
/// Tracks cache performance metrics including hits, misses, and hit rate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of cache entries
    pub entries: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

impl CacheStats {
    /// Create empty cache statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate from hits and misses
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Count a hit and refresh the hit rate
    pub fn record_hit(&mut self) {
        self.hits += 1;
        self.hit_rate = self.calculate_hit_rate();
    }

    /// Count a miss and refresh the hit rate
    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.hit_rate = self.calculate_hit_rate();
    }
}

/// Cache Provider Port
///
/// Defines the contract for cache store backends. Implementations
/// must provide string (JSON) storage with per-key TTL.
///
/// # Implementations
///
/// - **Moka**: In-memory cache with per-entry expiry
/// - **Redis**: Distributed cache shared by every service instance
/// - **Null**: No-op provider for testing
///
/// # Example
///
/// ```ignore
/// use slc_domain::ports::providers::CacheProvider;
///
/// let config = CacheEntryConfig::default().with_ttl_secs(600);
/// cache.set_json("Salesloft|1|2|3|Person|a@b.com", &json, config).await?;
///
/// if let Some(json) = cache.get_json("Salesloft|1|2|3|Person|a@b.com").await? {
///     let people: Vec<Record> = serde_json::from_str(&json)?;
/// }
/// ```
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Get a value from the cache as JSON string
    ///
    /// # Returns
    /// The cached JSON string if present, None if not found or expired
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Set a value in the cache, expiring after `config`'s TTL
    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()>;

    /// Delete a value from the cache
    ///
    /// # Returns
    /// True if the key was deleted, false if it didn't exist
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Check if a key exists in the cache
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Get cache statistics
    async fn stats(&self) -> Result<CacheStats>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "moka", "redis", "null")
    fn provider_name(&self) -> &str;
}
