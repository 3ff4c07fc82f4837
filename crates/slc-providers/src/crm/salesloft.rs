//! Salesloft CRM client
//!
//! Implements the CRM ports against the Salesloft v2 REST API. Responses
//! wrap their payload in a `data` envelope; listings are paginated through
//! `metadata.paging.next_page`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use slc_domain::error::{Error, Result};
use slc_domain::ports::providers::crm::{
    AccountProvider, CallProvider, CrmActivityProvider, PersonProvider,
};
use slc_domain::value_objects::{AccountRequest, CallRequest, PersonRequest, Record, RecordId};

use crate::constants::{
    CONTENT_TYPE_JSON, SALESLOFT_API_BASE_URL, SALESLOFT_MAX_PAGES, SALESLOFT_PAGE_SIZE,
};
use crate::utils::HttpResponseUtils;

const PROVIDER: &str = "Salesloft";

/// Salesloft API client
///
/// Receives its HTTP client via constructor injection.
///
/// ## Example
///
/// ```rust,no_run
/// use slc_providers::crm::SalesloftClient;
/// use std::time::Duration;
///
/// let client = SalesloftClient::new(
///     "api-key".to_string(),
///     None,
///     Duration::from_secs(30),
///     reqwest::Client::new(),
/// );
/// assert_eq!(client.base_url(), "https://api.salesloft.com/v2");
/// ```
#[derive(Clone)]
pub struct SalesloftClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    http_client: Client,
}

impl SalesloftClient {
    /// Create a new Salesloft client
    ///
    /// # Arguments
    /// * `api_key` - Salesloft API key
    /// * `base_url` - Optional custom base URL (defaults to the public API)
    /// * `timeout` - Request timeout duration
    /// * `http_client` - Reqwest HTTP client for making API requests
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| SALESLOFT_API_BASE_URL.to_string());

        Self {
            api_key: api_key.trim().to_string(),
            base_url,
            timeout,
            http_client,
        }
    }

    /// Get the base URL for this client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("Accept", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::network(format!("{PROVIDER} request timed out after {:?}", self.timeout))
            } else {
                Error::network_with_source(format!("{PROVIDER} request failed: {e}"), e)
            }
        })?;
        HttpResponseUtils::check_status(response, PROVIDER).await
    }

    /// Send a request and unwrap the `data` envelope
    async fn fetch(&self, builder: RequestBuilder) -> Result<(Value, Value)> {
        let response = self.send(builder).await?;
        let mut body = HttpResponseUtils::check_and_parse(response, PROVIDER).await?;

        let data = body
            .get_mut("data")
            .map(Value::take)
            .ok_or_else(|| Error::crm(format!("{PROVIDER} response is missing `data`")))?;
        let metadata = body.get_mut("metadata").map(Value::take).unwrap_or_default();
        Ok((data, metadata))
    }

    async fn list(&self, path: &str, filter: &[(&str, &str)]) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let builder = self
                .request(Method::GET, path)
                .query(filter)
                .query(&[("per_page", SALESLOFT_PAGE_SIZE), ("page", page)]);
            let (data, metadata) = self.fetch(builder).await?;

            let Value::Array(items) = data else {
                return Err(Error::crm(format!("{PROVIDER} {path} did not return a list")));
            };
            for item in items {
                records.push(Record::try_from(item)?);
            }

            let next = metadata
                .pointer("/paging/next_page")
                .and_then(Value::as_u64);
            match next {
                Some(next) if page < SALESLOFT_MAX_PAGES && next > u64::from(page) => {
                    page += 1;
                }
                _ => break,
            }
        }

        debug!(path, count = records.len(), "Salesloft listing fetched");
        Ok(records)
    }

    async fn write<T: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> Result<Record> {
        let builder = self
            .request(method, path)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .json(body);
        let (data, _) = self.fetch(builder).await?;
        Record::try_from(data)
    }

    async fn remove(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

impl std::fmt::Debug for SalesloftClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesloftClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AccountProvider for SalesloftClient {
    async fn find_account_by_domain(&self, domain: &str) -> Result<Vec<Record>> {
        self.list("accounts", &[("domain", domain)]).await
    }

    async fn create_account(&self, account: &AccountRequest) -> Result<Record> {
        self.write(Method::POST, "accounts", account).await
    }

    async fn update_account(&self, id: RecordId, account: &AccountRequest) -> Result<Record> {
        self.write(Method::PUT, &format!("accounts/{id}"), account)
            .await
    }

    async fn delete_account(&self, id: RecordId, _domain: &str) -> Result<()> {
        self.remove(&format!("accounts/{id}")).await
    }
}

#[async_trait]
impl PersonProvider for SalesloftClient {
    async fn find_person_by_email(&self, email: &str) -> Result<Vec<Record>> {
        self.list("people", &[("email_addresses[]", email)]).await
    }

    async fn create_person(&self, person: &PersonRequest) -> Result<Record> {
        self.write(Method::POST, "people", person).await
    }

    async fn update_person(&self, id: RecordId, person: &PersonRequest) -> Result<Record> {
        self.write(Method::PUT, &format!("people/{id}"), person).await
    }

    async fn delete_person(&self, id: RecordId, _email: &str) -> Result<()> {
        self.remove(&format!("people/{id}")).await
    }
}

#[async_trait]
impl CallProvider for SalesloftClient {
    async fn create_call(&self, call: &CallRequest) -> Result<Record> {
        self.write(Method::POST, "activities/calls", call).await
    }
}

#[async_trait]
impl CrmActivityProvider for SalesloftClient {
    async fn list_crm_activities(&self) -> Result<Vec<Record>> {
        self.list("crm_activities", &[]).await
    }
}
