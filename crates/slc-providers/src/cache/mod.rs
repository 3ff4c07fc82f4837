//! Cache Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullCacheProvider`] | Testing | No-op stub, every read misses |
//! | [`MokaCacheProvider`] | Local | In-memory cache with per-entry TTL |
//! | [`RedisCacheProvider`] | Distributed | Redis-backed, shared across service instances |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: `NullCacheProvider` or `MokaCacheProvider`
//! - **Single Instance**: `MokaCacheProvider`
//! - **Multi Instance**: `RedisCacheProvider`, so every instance serving a
//!   scenario sees the same scope entries

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

// Re-export for convenience
#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheProvider;
pub use null::NullCacheProvider;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheProvider;

// Re-export domain types used by cache providers
pub use slc_domain::ports::providers::cache::{CacheEntryConfig, CacheStats};
