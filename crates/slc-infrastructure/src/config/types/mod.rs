//! Configuration types module

pub mod app;
pub mod cache;
pub mod crm;
pub mod logging;

// Re-export main types
pub use app::AppConfig;
pub use cache::{CacheBackend, CacheConfig};
pub use crm::CrmConfig;
pub use logging::LoggingConfig;
