//! Scoped read-through caching for CRM clients
//!
//! [`ScopedCache`] binds a shared cache store to one [`CacheScope`] and keeps
//! that scope's key registry. [`CachingCrmClient`] layers the read-through
//! and invalidation protocol over any CRM client.
//!
//! [`CacheScope`]: slc_domain::value_objects::CacheScope

mod client;
mod store;

pub use client::CachingCrmClient;
pub use store::{REGISTRY_TTL_GRACE, ScopedCache};
