//! # Salesloft Cog Cache
//!
//! Request-scoped read-through cache in front of the Salesloft CRM.
//!
//! Lookups of accounts (by domain) and people (by email) are cached per
//! scope: one scenario run of one requestor, identified by request,
//! scenario, requestor and optional connection ids. Writes through the
//! caching client invalidate what they may have made stale, and every scope
//! keeps a registry of its keys so bulk invalidation knows what to delete.
//!
//! ## Example
//!
//! ```ignore
//! use slc::infrastructure::{ConfigLoader, CrmBootstrap};
//! use slc::domain::ScopeIdentity;
//! use slc::domain::ports::providers::AccountProvider;
//!
//! let bootstrap = CrmBootstrap::new(ConfigLoader::new().load()?)?;
//! let client = bootstrap.salesloft_client(ScopeIdentity::new("req-1", "scn-1", "rqr-1"))?;
//! let accounts = client.find_account_by_domain("acme.com").await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, scopes, records and port traits
//! - `application` - the caching client and operation use cases
//! - `providers` - cache stores (Moka, Redis, Null) and the Salesloft client
//! - `infrastructure` - configuration, logging and bootstrap
//! - `cli` - the `slc` command line

/// Domain layer - core types and port traits
pub mod domain {
    pub use slc_domain::*;
}

/// Application layer - caching client and use cases
pub mod application {
    pub use slc_application::*;
}

/// Provider implementations
pub mod providers {
    pub use slc_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
pub mod infrastructure {
    pub use slc_infrastructure::*;
}

pub mod cli;

// Re-export commonly used types at the crate root
pub use application::{CachingCrmClient, ScopedCache};
pub use domain::{CacheScope, Error, Result, ScopeIdentity};
pub use infrastructure::{AppConfig, ConfigLoader, CrmBootstrap};
