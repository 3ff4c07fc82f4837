//! Cache store wiring
//!
//! Store implementations live in `slc-providers`; this module picks one
//! from configuration.

pub mod factory;

pub use factory::{CacheProviderFactory, SharedCacheProvider};
