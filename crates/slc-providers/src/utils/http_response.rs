//! HTTP Response Utilities
//!
//! Helper functions for processing responses from the CRM API.

use slc_domain::error::{Error, Result};
use reqwest::Response;

/// Format error message for a CRM call
fn crm_error(provider: &str, context: &str, details: &str, status: u16) -> Error {
    Error::crm_with_status(format!("{provider} {context}: {details}"), status)
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Turn a non-success status into a CRM error
    pub async fn check_status(response: Response, provider_name: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let code = status.as_u16();

        Err(match code {
            401 | 403 => crm_error(provider_name, "authentication failed", &error_text, code),
            404 => crm_error(provider_name, "resource not found", &error_text, code),
            422 => crm_error(provider_name, "validation failed", &error_text, code),
            429 => crm_error(provider_name, "rate limit exceeded", &error_text, code),
            500..=599 => crm_error(
                provider_name,
                &format!("server error ({code})"),
                &error_text,
                code,
            ),
            _ => crm_error(
                provider_name,
                &format!("request failed ({code})"),
                &error_text,
                code,
            ),
        })
    }

    /// Check response status and parse JSON
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `provider_name` - Name of the provider for error messages
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value> {
        let response = Self::check_status(response, provider_name).await?;
        let status = response.status().as_u16();

        response.json().await.map_err(|e| {
            crm_error(provider_name, "response parse failed", &e.to_string(), status)
        })
    }
}
