//! Provider Constants
//!
//! Constants specific to provider implementations. Domain constants live in
//! `slc-domain`.

// ============================================================================
// CACHE PROVIDER CONSTANTS
// ============================================================================

/// Default maximum number of entries held by the in-memory cache
pub const CACHE_DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Default Redis URL
pub const REDIS_DEFAULT_URL: &str = "redis://localhost:6379";

// ============================================================================
// SALESLOFT CONSTANTS
// ============================================================================

/// Salesloft REST API base URL
pub const SALESLOFT_API_BASE_URL: &str = "https://api.salesloft.com/v2";

/// Page size used for listing endpoints (API maximum)
pub const SALESLOFT_PAGE_SIZE: u32 = 100;

/// Upper bound on pages followed by a single listing call
pub const SALESLOFT_MAX_PAGES: u32 = 50;

/// Default request timeout in seconds
pub const SALESLOFT_TIMEOUT_SECS: u64 = 30;

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";
