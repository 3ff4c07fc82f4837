//! Infrastructure layer constants
//!
//! Domain constants are defined in `slc_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "slc.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "slc";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SLC";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "SLC_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// CRM CONSTANTS
// ============================================================================

/// User agent sent to the CRM
pub const DEFAULT_USER_AGENT: &str = concat!("slc/", env!("CARGO_PKG_VERSION"));
