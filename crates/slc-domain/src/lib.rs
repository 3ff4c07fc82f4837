//! # Salesloft Cog Cache - Domain Layer
//!
//! Core types shared by every other crate in the workspace:
//!
//! - [`error`] - the workspace error type
//! - [`constants`] - TTLs and key layout
//! - [`value_objects`] - scopes, cache keys, records and write payloads
//! - [`ports`] - cache store and CRM client traits

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::{
    AccountRequest, CacheKey, CacheScope, CallRequest, EntityKind, PersonRequest, Record,
    RecordId, ScopeIdentity,
};
