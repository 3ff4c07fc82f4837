//! Domain layer constants
//!
//! Constants that shape cache keys and entry lifetimes. Infrastructure
//! constants (config file names, env prefixes) live in `slc-infrastructure`.

// ============================================================================
// CACHE DOMAIN CONSTANTS
// ============================================================================

/// Default TTL for cached CRM reads and the key registry (10 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Separator between cache key segments
pub const CACHE_KEY_SEPARATOR: char = '|';

/// Escape character for separators inside scope segments
pub const CACHE_KEY_ESCAPE: char = '\\';

/// Connection segment of a scope without a connection id
///
/// An escape followed by anything but a separator or another escape never
/// comes out of segment escaping, so no real connection id maps to it.
pub const NO_CONNECTION_SEGMENT: &str = "\\-";

/// Leading segment of every scope's key registry entry
pub const CACHE_REGISTRY_PREFIX: &str = "cachekeys";

/// System name this crate caches for
pub const DEFAULT_SYSTEM_NAME: &str = "Salesloft";

// ============================================================================
// RECORD CONSTANTS
// ============================================================================

/// Field every CRM record carries
pub const RECORD_ID_FIELD: &str = "id";

/// Nested map holding non-standard fields on accounts and people
pub const CUSTOM_FIELDS_KEY: &str = "custom_fields";
