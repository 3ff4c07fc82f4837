//! Salesloft client factory

use std::time::Duration;

use slc_domain::error::{Error, Result};
use slc_providers::crm::SalesloftClient;
use tracing::debug;

use crate::config::CrmConfig;
use crate::error_ext::ErrorContext;

/// Builds Salesloft clients from configuration
#[derive(Debug, Clone, Copy)]
pub struct CrmClientFactory;

impl CrmClientFactory {
    /// Create a Salesloft client
    ///
    /// Fails when no API key is configured.
    pub fn create_from_config(config: &CrmConfig) -> Result<SalesloftClient> {
        let api_key = require_api_key(config)?;
        let timeout = Duration::from_secs(config.timeout_secs);

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .network_context("Failed to build HTTP client")?;

        let client = SalesloftClient::new(
            api_key.to_string(),
            config.base_url.clone(),
            timeout,
            http_client,
        );
        debug!(base_url = client.base_url(), "Salesloft client ready");
        Ok(client)
    }
}

/// The configured API key, or a configuration error when it is blank
pub fn require_api_key(config: &CrmConfig) -> Result<&str> {
    let key = config.api_key.trim();
    if key.is_empty() {
        return Err(Error::configuration(
            "Salesloft API key is required (set crm.api_key or SLC_CRM__API_KEY)",
        ));
    }
    Ok(key)
}
