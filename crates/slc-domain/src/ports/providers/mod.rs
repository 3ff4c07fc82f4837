//! External Provider Ports
//!
//! Ports for external services the domain depends on.
//!
//! | Port | Description |
//! |------|-------------|
//! | CacheProvider | Expiring key/value store |
//! | AccountProvider, PersonProvider, CallProvider, CrmActivityProvider | Remote CRM capabilities |
//! | CrmClient | Union of the CRM capabilities |

/// Cache provider port
pub mod cache;
/// CRM client ports
pub mod crm;

// Re-export provider ports for convenience
pub use cache::{CacheEntryConfig, CacheProvider, CacheStats};
pub use crm::{AccountProvider, CallProvider, CrmActivityProvider, CrmClient, PersonProvider};
