//! Application Layer - Salesloft Cog Cache
//!
//! ## Caching
//!
//! [`caching::CachingCrmClient`] wraps any CRM client and serves its
//! lookups from a scoped cache:
//!
//! - reads go through the cache and populate it on a non-empty miss
//! - deletes invalidate the one key they affect
//! - creates, updates and call logging invalidate the whole scope
//! - cache store failures are logged and never reach the caller
//!
//! ## Use Cases
//!
//! Operation handlers built on the `CrmClient` port: account and person
//! create-or-update, delete, discover and field checks, call logging and
//! CRM activity checks.
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `slc-domain`: for scopes, records and the port traits
//! - Pure Rust libraries for async, serialization, etc.

pub mod caching;
pub mod use_cases;

pub use caching::{CachingCrmClient, ScopedCache};
pub use use_cases::*;
