//! Domain Port Interfaces
//!
//! Defines the boundary contracts between the domain and external layers.
//! High-level modules (domain, application) define interfaces; low-level
//! modules (providers, infrastructure) implement them.

/// External service provider ports
pub mod providers;

// Re-export commonly used port traits for convenience
pub use providers::{
    AccountProvider, CacheEntryConfig, CacheProvider, CacheStats, CallProvider,
    CrmActivityProvider, CrmClient, PersonProvider,
};
