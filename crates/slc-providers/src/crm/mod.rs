//! CRM Client Implementations
//!
//! Remote clients implementing the CRM capability ports. These are the
//! source of truth the caching layer wraps.

pub mod salesloft;

pub use salesloft::SalesloftClient;
