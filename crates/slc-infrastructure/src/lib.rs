//! Infrastructure Layer - Salesloft Cog Cache
//!
//! Cross-cutting concerns and wiring:
//!
//! - [`config`] - figment-based configuration (defaults, `slc.toml`, `SLC_` env)
//! - [`logging`] - tracing subscriber setup
//! - [`error_ext`] - context helpers for foreign errors
//! - [`cache`] - cache store factory
//! - [`crm`] - Salesloft client factory
//! - [`bootstrap`] - assembles a caching client for one scope

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod constants;
pub mod crm;
pub mod error_ext;
pub mod logging;

pub use bootstrap::CrmBootstrap;
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
