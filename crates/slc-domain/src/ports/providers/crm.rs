//! CRM Client Ports
//!
//! One trait per CRM capability. [`CrmClient`] is the union of all of them
//! and is implemented automatically for any type providing every capability,
//! so the remote client and the caching wrapper are interchangeable.

use crate::error::Result;
use crate::value_objects::{AccountRequest, CallRequest, PersonRequest, Record, RecordId};
use async_trait::async_trait;

/// Account operations
#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Accounts whose domain equals `domain`
    async fn find_account_by_domain(&self, domain: &str) -> Result<Vec<Record>>;

    /// Create an account
    async fn create_account(&self, account: &AccountRequest) -> Result<Record>;

    /// Update the account with `id`
    async fn update_account(&self, id: RecordId, account: &AccountRequest) -> Result<Record>;

    /// Delete the account with `id`
    ///
    /// `domain` is the domain the caller found the account by. Remote
    /// clients ignore it; caching clients use it to invalidate the lookup.
    async fn delete_account(&self, id: RecordId, domain: &str) -> Result<()>;
}

/// Person operations
#[async_trait]
pub trait PersonProvider: Send + Sync {
    /// People whose email address equals `email`
    async fn find_person_by_email(&self, email: &str) -> Result<Vec<Record>>;

    /// Create a person
    async fn create_person(&self, person: &PersonRequest) -> Result<Record>;

    /// Update the person with `id`
    async fn update_person(&self, id: RecordId, person: &PersonRequest) -> Result<Record>;

    /// Delete the person with `id`
    ///
    /// `email` is the address the caller found the person by. Remote
    /// clients ignore it; caching clients use it to invalidate the lookup.
    async fn delete_person(&self, id: RecordId, email: &str) -> Result<()>;
}

/// Call logging
#[async_trait]
pub trait CallProvider: Send + Sync {
    /// Log a call
    async fn create_call(&self, call: &CallRequest) -> Result<Record>;
}

/// CRM activity listing
#[async_trait]
pub trait CrmActivityProvider: Send + Sync {
    /// Every CRM activity visible to the credentials, unfiltered
    async fn list_crm_activities(&self) -> Result<Vec<Record>>;
}

/// Full CRM client capability set
pub trait CrmClient: AccountProvider + PersonProvider + CallProvider + CrmActivityProvider {}

impl<T> CrmClient for T where T: AccountProvider + PersonProvider + CallProvider + CrmActivityProvider
{}
