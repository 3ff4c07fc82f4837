//! Configuration
//!
//! Typed configuration loaded through figment. See [`loader::ConfigLoader`]
//! for the source order.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
