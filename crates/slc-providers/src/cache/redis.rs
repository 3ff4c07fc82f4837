//! Redis distributed cache provider
//!
//! Cache store shared by every service instance. Entries are written with
//! `PSETEX` so they expire on their own, to the millisecond; nothing here
//! ever needs an explicit teardown.
//!
//! ## Example
//!
//! ```ignore
//! use slc_providers::cache::RedisCacheProvider;
//!
//! let provider = RedisCacheProvider::new("redis://localhost:6379")?;
//! // Or with host/port
//! let provider = RedisCacheProvider::with_host_port("localhost", 6379)?;
//! ```

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use slc_domain::error::{Error, Result};
use slc_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider, CacheStats};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Expiry in whole milliseconds, rounded up; `None` for a zero TTL
fn expiry_millis(ttl: Duration) -> Option<u64> {
    if ttl.is_zero() {
        return None;
    }
    let millis = ttl.as_nanos().div_ceil(1_000_000);
    Some(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Redis cache provider
///
/// Uses multiplexed connections for efficient connection reuse.
#[derive(Clone)]
pub struct RedisCacheProvider {
    client: Client,
    address: String,
    stats: Arc<RwLock<CacheStats>>,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider with connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::infrastructure_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;

        // Keep credentials out of Debug output
        let address = connection_string
            .rsplit_once('@')
            .map_or(connection_string, |(_, host)| host)
            .to_string();

        Ok(Self {
            client,
            address,
            stats: Arc::new(RwLock::new(CacheStats::new())),
        })
    }

    /// Create a new Redis cache provider with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Get a connection from the pool
    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                Error::infrastructure_with_source(format!("Failed to get Redis connection: {e}"), e)
            })
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

    /// Get the Redis server address description
    pub fn server_address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;

        let value: Option<String> = conn.get(key).await.map_err(|e| {
            Error::infrastructure_with_source(format!("Redis GET failed: {e}"), e)
        })?;
        self.record(value.is_some());
        Ok(value)
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut conn = self.get_connection().await?;

        // A zero TTL expires on write: drop any older value instead
        let Some(millis) = expiry_millis(config.effective_ttl()) else {
            let _: i64 = conn.del(key).await.map_err(|e| {
                Error::infrastructure_with_source(format!("Redis DEL failed: {e}"), e)
            })?;
            return Ok(());
        };

        let result: redis::RedisResult<()> = conn.pset_ex(key, value, millis).await;
        result.map_err(|e| Error::infrastructure_with_source(format!("Redis PSETEX failed: {e}"), e))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let deleted: i64 = conn.del(key).await.map_err(|e| {
            Error::infrastructure_with_source(format!("Redis DEL failed: {e}"), e)
        })?;
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let exists: i64 = conn.exists(key).await.map_err(|e| {
            Error::infrastructure_with_source(format!("Redis EXISTS failed: {e}"), e)
        })?;
        Ok(exists > 0)
    }

    async fn stats(&self) -> Result<CacheStats> {
        let mut conn = self.get_connection().await?;

        // DBSIZE counts every key in the shared database, not just ours
        let dbsize: redis::RedisResult<u64> = redis::cmd("DBSIZE").query_async(&mut conn).await;

        let mut stats = self
            .stats
            .read()
            .map_err(|_| Error::internal("Failed to read cache stats"))?
            .clone();
        stats.entries = dbsize.unwrap_or(0);
        Ok(stats)
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("server", &self.server_address())
            .finish()
    }
}
