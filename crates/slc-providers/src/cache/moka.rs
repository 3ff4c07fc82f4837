//! Moka in-memory cache provider
//!
//! Concurrent in-memory cache with a TTL per entry, matching the
//! `SETEX` semantics of the Redis provider.
//!
//! ## Example
//!
//! ```ignore
//! use slc_providers::cache::MokaCacheProvider;
//!
//! let provider = MokaCacheProvider::with_capacity(1_000);
//! ```

use crate::constants::CACHE_DEFAULT_MAX_ENTRIES;
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use slc_domain::error::Result;
use slc_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider, CacheStats};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Stored value together with the TTL it was written with
#[derive(Clone)]
struct CachedValue {
    json: Arc<str>,
    ttl: Duration,
}

/// Expires every entry after the TTL it was inserted with
struct PerEntryExpiry;

impl Expiry<String, CachedValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // Overwrites restart the clock, like SETEX
        Some(value.ttl)
    }
}

/// Moka-based in-memory cache provider
///
/// Capacity is counted in entries. Each entry expires after the TTL of the
/// `set_json` call that wrote it.
#[derive(Clone)]
pub struct MokaCacheProvider {
    cache: Cache<String, CachedValue>,
    max_entries: u64,
    stats: Arc<RwLock<CacheStats>>,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheProvider {
    /// Create a new Moka cache provider with default capacity
    pub fn new() -> Self {
        Self::with_capacity(CACHE_DEFAULT_MAX_ENTRIES)
    }

    /// Create a new Moka cache provider holding at most `max_entries`
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryExpiry)
            .build();

        Self {
            cache,
            max_entries,
            stats: Arc::new(RwLock::new(CacheStats::new())),
        }
    }

    /// Get the maximum capacity of the cache
    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }

    fn record(&self, hit: bool) {
        if let Ok(mut stats) = self.stats.write() {
            if hit {
                stats.record_hit();
            } else {
                stats.record_miss();
            }
        }
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let value = self.cache.get(key).await;
        self.record(value.is_some());
        Ok(value.map(|v| v.json.to_string()))
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let entry = CachedValue {
            json: Arc::from(value),
            ttl: config.effective_ttl(),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn stats(&self) -> Result<CacheStats> {
        // Run pending tasks to ensure entry_count is accurate
        self.cache.run_pending_tasks().await;

        let mut stats = self
            .stats
            .read()
            .map(|s| s.clone())
            .unwrap_or_default();
        stats.entries = self.cache.entry_count();
        Ok(stats)
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("max_entries", &self.max_entries)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
