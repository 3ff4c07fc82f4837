//! Per-request assembly of the caching client
//!
//! The cache store is created once and shared; each request gets its own
//! [`CachingCrmClient`] bound to the scope built from its identifiers.

use std::fmt;
use std::time::Duration;

use slc_application::caching::{CachingCrmClient, ScopedCache};
use slc_domain::error::Result;
use slc_domain::value_objects::{CacheScope, ScopeIdentity};
use slc_providers::crm::SalesloftClient;
use tracing::debug;

use crate::cache::{CacheProviderFactory, SharedCacheProvider};
use crate::config::AppConfig;
use crate::crm::CrmClientFactory;

/// Holds configuration and the shared cache store
#[derive(Clone)]
pub struct CrmBootstrap {
    config: AppConfig,
    store: SharedCacheProvider,
}

impl CrmBootstrap {
    /// Create the cache store described by `config`
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = CacheProviderFactory::create_from_config(&config.cache)?;
        Ok(Self::with_store(config, store))
    }

    /// Use an existing store
    pub fn with_store(config: AppConfig, store: SharedCacheProvider) -> Self {
        Self { config, store }
    }

    /// Loaded configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared cache store
    pub fn store(&self) -> &SharedCacheProvider {
        &self.store
    }

    /// TTL applied to entries and registries
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.cache.ttl_secs)
    }

    /// Scope of the configured system for `identity`
    pub fn scope(&self, identity: ScopeIdentity) -> CacheScope {
        CacheScope::new(self.config.cache.system_name.clone(), identity)
    }

    /// Scopes of the linked systems sharing `scope`'s identity
    pub fn linked_scopes(&self, scope: &CacheScope) -> Vec<CacheScope> {
        self.config
            .cache
            .linked_systems
            .iter()
            .filter(|system| **system != scope.system)
            .map(|system| scope.sibling(system.clone()))
            .collect()
    }

    /// Cache view over the shared store for `identity`
    pub fn scoped_cache(&self, identity: ScopeIdentity) -> ScopedCache {
        ScopedCache::new(self.store.clone(), self.scope(identity), self.ttl())
    }

    /// Wrap `inner` in a caching client for `identity`
    pub fn caching_client<C>(&self, inner: C, identity: ScopeIdentity) -> CachingCrmClient<C> {
        let cache = self.scoped_cache(identity);
        let linked = self.linked_scopes(cache.scope());
        debug!(scope = %cache.scope(), linked = linked.len(), "Caching client assembled");
        CachingCrmClient::new(inner, cache).with_linked_scopes(linked)
    }

    /// Caching Salesloft client for `identity`
    pub fn salesloft_client(
        &self,
        identity: ScopeIdentity,
    ) -> Result<CachingCrmClient<SalesloftClient>> {
        let inner = CrmClientFactory::create_from_config(&self.config.crm)?;
        Ok(self.caching_client(inner, identity))
    }
}

impl fmt::Debug for CrmBootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrmBootstrap")
            .field("system", &self.config.cache.system_name)
            .field("store", &self.store.provider_name())
            .finish()
    }
}
