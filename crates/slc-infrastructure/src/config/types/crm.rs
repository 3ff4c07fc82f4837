//! CRM client configuration types

use serde::{Deserialize, Serialize};
use slc_providers::constants::SALESLOFT_TIMEOUT_SECS;

use crate::constants::DEFAULT_USER_AGENT;

/// Salesloft API configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    /// API base URL; the public API when unset
    pub base_url: Option<String>,

    /// API key; required by commands that reach the CRM
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: String::new(),
            timeout_secs: SALESLOFT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for CrmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
