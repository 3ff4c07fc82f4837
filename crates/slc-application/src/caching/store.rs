//! Scope-bound view of a shared cache store
//!
//! Every operation here is best-effort: store and (de)serialization
//! failures are logged and reported as a miss or a no-op, never as an error.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use slc_domain::error::Result;
use slc_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider};
use slc_domain::value_objects::{CacheKey, CacheScope, EntityKind};

/// Extra lifetime of the key registry over the entries it lists
///
/// The registry is written just before the entry it gains, so it outlives
/// every entry written within this grace of the registry write.
pub const REGISTRY_TTL_GRACE: Duration = Duration::from_secs(5);

/// A cache store seen through one scope
///
/// Holds the scope's key registry: the list of entry keys populated for the
/// scope, stored under [`CacheScope::registry_key`] with the entry TTL plus
/// [`REGISTRY_TTL_GRACE`]. The registry has set semantics and keeps
/// insertion order. A missing registry is empty; one that can not be read
/// is unknown, and nothing that relies on its contents goes ahead.
///
/// Registry updates are read-modify-write and not atomic. Two concurrent
/// registrations in one scope can lose a key; the lost entry then survives
/// [`invalidate_all`](Self::invalidate_all) until its own TTL expires.
#[derive(Clone)]
pub struct ScopedCache {
    provider: Arc<dyn CacheProvider>,
    scope: CacheScope,
    entry_config: CacheEntryConfig,
    registry_config: CacheEntryConfig,
}

impl ScopedCache {
    /// Bind `provider` to `scope`, writing every entry with `ttl`
    pub fn new(provider: Arc<dyn CacheProvider>, scope: CacheScope, ttl: Duration) -> Self {
        Self {
            provider,
            scope,
            entry_config: CacheEntryConfig::new().with_ttl(ttl),
            registry_config: CacheEntryConfig::new()
                .with_ttl(ttl.saturating_add(REGISTRY_TTL_GRACE)),
        }
    }

    /// Same store and TTL, different scope
    pub fn for_scope(&self, scope: CacheScope) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            scope,
            entry_config: self.entry_config,
            registry_config: self.registry_config,
        }
    }

    /// The bound scope
    pub fn scope(&self) -> &CacheScope {
        &self.scope
    }

    /// TTL applied to entries
    pub fn ttl(&self) -> Duration {
        self.entry_config.effective_ttl()
    }

    /// Key of the cached lookup for `kind` and `discriminator` in this scope
    pub fn entry_key(&self, kind: EntityKind, discriminator: &str) -> CacheKey {
        self.scope.entry_key(kind, discriminator)
    }

    /// Read and decode a value; any failure is a miss
    pub async fn get<T>(&self, key: &CacheKey) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.load(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Read and decode a value, keeping store and decode failures apart
    /// from a missing key
    async fn load<T>(&self, key: &CacheKey) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.provider.get_json(key.as_str()).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Encode and write a value with the scope TTL
    ///
    /// Returns whether the store accepted the write.
    pub async fn set<T>(&self, key: &CacheKey, value: &T) -> bool
    where
        T: Serialize + Sync + ?Sized,
    {
        self.write(key, value, self.entry_config).await
    }

    async fn write<T>(&self, key: &CacheKey, value: &T, config: CacheEntryConfig) -> bool
    where
        T: Serialize + Sync + ?Sized,
    {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %key, error = %e, "value not serializable, skipping cache write");
                return false;
            }
        };

        match self.provider.set_json(key.as_str(), &json, config).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "cache write failed");
                false
            }
        }
    }

    /// Delete one key
    ///
    /// Returns whether the key existed and was removed.
    pub async fn delete(&self, key: &CacheKey) -> bool {
        match self.provider.delete(key.as_str()).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(key = %key, error = %e, "cache delete failed");
                false
            }
        }
    }

    /// Keys currently listed in the registry
    ///
    /// A missing registry is empty. `None` means the registry could not be
    /// read or decoded, so its contents are unknown.
    pub async fn registered_keys(&self) -> Option<Vec<CacheKey>> {
        let registry = self.scope.registry_key();
        match self.load(&registry).await {
            Ok(keys) => Some(keys.unwrap_or_default()),
            Err(e) => {
                warn!(key = %registry, error = %e, "cache key registry unreadable");
                None
            }
        }
    }

    /// Add `key` to the registry unless already listed
    ///
    /// The registry is written back either way, renewing its TTL. Returns
    /// whether `key` is now listed; an unreadable registry is left alone.
    pub async fn register(&self, key: &CacheKey) -> bool {
        let Some(mut keys) = self.registered_keys().await else {
            return false;
        };
        if !keys.contains(key) {
            keys.push(key.clone());
        }
        self.write(&self.scope.registry_key(), &keys, self.registry_config)
            .await
    }

    /// Register `key`, then write the entry
    ///
    /// The key is in the registry before the entry becomes visible. When it
    /// can not be registered the entry is not written at all.
    pub async fn populate<T>(&self, key: &CacheKey, value: &T)
    where
        T: Serialize + Sync + ?Sized,
    {
        if !self.register(key).await {
            warn!(key = %key, "key not registered, skipping cache write");
            return;
        }
        if self.set(key, value).await {
            debug!(key = %key, ttl_secs = self.ttl().as_secs(), "cache populated");
        }
    }

    /// Delete every registered key, then reset the registry to empty
    ///
    /// Returns the number of entries actually removed. An unreadable
    /// registry is neither acted on nor reset.
    pub async fn invalidate_all(&self) -> usize {
        let Some(keys) = self.registered_keys().await else {
            warn!(scope = %self.scope, "cache scope not invalidated, registry unreadable");
            return 0;
        };
        let mut removed = 0;
        for key in &keys {
            if self.delete(key).await {
                removed += 1;
            }
        }

        self.write(
            &self.scope.registry_key(),
            &Vec::<CacheKey>::new(),
            self.registry_config,
        )
        .await;
        debug!(
            scope = %self.scope,
            registered = keys.len(),
            removed,
            "cache scope invalidated"
        );
        removed
    }
}

impl fmt::Debug for ScopedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedCache")
            .field("scope", &self.scope.prefix())
            .field("provider", &self.provider.provider_name())
            .field("ttl", &self.ttl())
            .finish()
    }
}
