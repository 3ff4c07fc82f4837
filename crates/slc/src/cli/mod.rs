//! Command line interface
//!
//! Operates the cache of one scope by hand: look records up through it,
//! delete them through it, and inspect what the scope has registered.
//! Inspection is only meaningful with a shared store (Redis); the in-memory
//! store starts empty with every process.

mod commands;
mod types;

pub use commands::run;
pub use types::{AccountCommands, CacheCommands, Cli, Commands, PersonCommands, ScopeArgs};
