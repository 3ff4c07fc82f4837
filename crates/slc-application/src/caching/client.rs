//! Caching CRM client
//!
//! Implements the same CRM ports as the client it wraps, so it can stand in
//! for that client anywhere.
//!
//! | Operation | Cache behaviour |
//! |-----------|-----------------|
//! | `find_account_by_domain`, `find_person_by_email` | read-through, non-empty results populate |
//! | `delete_account`, `delete_person` | delete the one entry for the discriminator |
//! | `create_*`, `update_*`, `create_call` | invalidate the scope and every linked scope |
//! | `list_crm_activities` | pass-through, never cached |
//!
//! Invalidation runs only after the remote write succeeded. A failed write
//! returns its error untouched and leaves the cache as it was.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use tracing::debug;

use slc_domain::error::Result;
use slc_domain::ports::providers::crm::{
    AccountProvider, CallProvider, CrmActivityProvider, PersonProvider,
};
use slc_domain::value_objects::{
    AccountRequest, CacheScope, CallRequest, EntityKind, PersonRequest, Record, RecordId,
};

use super::store::ScopedCache;

/// Read-through caching wrapper around a CRM client
///
/// ## Example
///
/// ```ignore
/// let cache = ScopedCache::new(store, scope.clone(), Duration::from_secs(600));
/// let client = CachingCrmClient::new(salesloft, cache)
///     .with_linked_scopes([scope.sibling("Salesforce")]);
///
/// let accounts = client.find_account_by_domain("acme.com").await?;
/// ```
pub struct CachingCrmClient<C> {
    inner: C,
    cache: ScopedCache,
    linked: Vec<ScopedCache>,
}

impl<C> CachingCrmClient<C> {
    /// Wrap `inner`, caching in `cache`'s scope
    pub fn new(inner: C, cache: ScopedCache) -> Self {
        Self {
            inner,
            cache,
            linked: Vec::new(),
        }
    }

    /// Also clear these scopes on bulk invalidation
    ///
    /// Linked scopes share the store of the own scope; listing the own
    /// scope again has no effect.
    pub fn with_linked_scopes<I>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = CacheScope>,
    {
        let cache = &self.cache;
        let linked: Vec<ScopedCache> = scopes
            .into_iter()
            .filter(|scope| scope != cache.scope())
            .map(|scope| cache.for_scope(scope))
            .collect();
        self.linked.extend(linked);
        self
    }

    /// The wrapped client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The own scope's cache
    pub fn cache(&self) -> &ScopedCache {
        &self.cache
    }

    /// Scopes cleared alongside the own scope
    pub fn linked_scopes(&self) -> impl Iterator<Item = &CacheScope> {
        self.linked.iter().map(ScopedCache::scope)
    }

    async fn read_through<F>(
        &self,
        kind: EntityKind,
        discriminator: &str,
        fetch: F,
    ) -> Result<Vec<Record>>
    where
        F: Future<Output = Result<Vec<Record>>>,
    {
        let key = self.cache.entry_key(kind, discriminator);
        if let Some(records) = self.cache.get::<Vec<Record>>(&key).await {
            debug!(key = %key, "cache hit");
            return Ok(records);
        }

        debug!(key = %key, "cache miss");
        let records = fetch.await?;
        // Empty results stay uncached so a later lookup sees the entity once it exists
        if !records.is_empty() {
            self.cache.populate(&key, &records).await;
        }
        Ok(records)
    }

    async fn invalidate_scopes(&self) {
        self.cache.invalidate_all().await;
        for linked in &self.linked {
            linked.invalidate_all().await;
        }
    }

    async fn invalidate_entry(&self, kind: EntityKind, discriminator: &str) {
        let key = self.cache.entry_key(kind, discriminator);
        let removed = self.cache.delete(&key).await;
        debug!(key = %key, removed, "cache entry invalidated");
    }
}

#[async_trait]
impl<C: AccountProvider> AccountProvider for CachingCrmClient<C> {
    async fn find_account_by_domain(&self, domain: &str) -> Result<Vec<Record>> {
        self.read_through(
            EntityKind::Account,
            domain,
            self.inner.find_account_by_domain(domain),
        )
        .await
    }

    async fn create_account(&self, account: &AccountRequest) -> Result<Record> {
        let created = self.inner.create_account(account).await?;
        self.invalidate_scopes().await;
        Ok(created)
    }

    async fn update_account(&self, id: RecordId, account: &AccountRequest) -> Result<Record> {
        let updated = self.inner.update_account(id, account).await?;
        self.invalidate_scopes().await;
        Ok(updated)
    }

    async fn delete_account(&self, id: RecordId, domain: &str) -> Result<()> {
        self.inner.delete_account(id, domain).await?;
        self.invalidate_entry(EntityKind::Account, domain).await;
        Ok(())
    }
}

#[async_trait]
impl<C: PersonProvider> PersonProvider for CachingCrmClient<C> {
    async fn find_person_by_email(&self, email: &str) -> Result<Vec<Record>> {
        self.read_through(
            EntityKind::Person,
            email,
            self.inner.find_person_by_email(email),
        )
        .await
    }

    async fn create_person(&self, person: &PersonRequest) -> Result<Record> {
        let created = self.inner.create_person(person).await?;
        self.invalidate_scopes().await;
        Ok(created)
    }

    async fn update_person(&self, id: RecordId, person: &PersonRequest) -> Result<Record> {
        let updated = self.inner.update_person(id, person).await?;
        self.invalidate_scopes().await;
        Ok(updated)
    }

    async fn delete_person(&self, id: RecordId, email: &str) -> Result<()> {
        self.inner.delete_person(id, email).await?;
        self.invalidate_entry(EntityKind::Person, email).await;
        Ok(())
    }
}

#[async_trait]
impl<C: CallProvider> CallProvider for CachingCrmClient<C> {
    async fn create_call(&self, call: &CallRequest) -> Result<Record> {
        let logged = self.inner.create_call(call).await?;
        self.invalidate_scopes().await;
        Ok(logged)
    }
}

#[async_trait]
impl<C: CrmActivityProvider> CrmActivityProvider for CachingCrmClient<C> {
    async fn list_crm_activities(&self) -> Result<Vec<Record>> {
        self.inner.list_crm_activities().await
    }
}

impl<C> fmt::Debug for CachingCrmClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingCrmClient")
            .field("cache", &self.cache)
            .field(
                "linked",
                &self.linked_scopes().map(CacheScope::prefix).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
