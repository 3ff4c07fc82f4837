//! # Salesloft Cog Cache - Provider Implementations
//!
//! Adapters implementing the ports defined in `slc-domain`.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache | `CacheProvider` | Moka, Redis, Null |
//! | CRM | `CrmClient` | Salesloft |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! slc-providers = { version = "0.1", default-features = false, features = ["cache-redis", "crm-salesloft"] }
//! ```

// Re-export slc-domain types commonly used with providers
pub use slc_domain::error::{Error, Result};
pub use slc_domain::ports::providers::{CacheProvider, CrmClient};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
#[cfg(feature = "crm-salesloft")]
pub mod utils;

/// Cache provider implementations
///
/// Implements `CacheProvider` for cache store backends.
pub mod cache;

/// CRM client implementations
#[cfg(feature = "crm-salesloft")]
pub mod crm;
