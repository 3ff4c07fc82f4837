//! Account use cases

use std::sync::Arc;

use serde_json::{Map, Value};
use slc_domain::error::{Error, Result};
use slc_domain::ports::providers::CrmClient;
use slc_domain::value_objects::{AccountRequest, Record};

use super::FieldCheck;
use super::outcome::{Outcome, OutcomeRecord, id_record, scalar_fields};

/// Account operations
///
/// Accounts are identified by domain and name: several accounts may share
/// a domain, and the one whose name matches is the one acted upon.
pub struct AccountService {
    client: Arc<dyn CrmClient>,
}

impl AccountService {
    /// Create the service over `client`
    pub fn new(client: Arc<dyn CrmClient>) -> Self {
        Self { client }
    }

    async fn find_named(&self, name: &str, domain: &str) -> Result<Option<Record>> {
        let accounts = self.client.find_account_by_domain(domain).await?;
        Ok(accounts
            .into_iter()
            .find(|account| account.get_str("name") == Some(name)))
    }

    /// Update the account matching the payload's domain and name, or create it
    pub async fn create_or_update(&self, fields: Map<String, Value>) -> Outcome {
        let payload = AccountRequest::from_fields(fields);
        let Some(domain) = payload.domain() else {
            return Outcome::error("A domain is required to create or update a Salesloft account.");
        };

        match self.upsert(&payload, domain).await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::error(format!(
                "There was an error creating or updating the account in Salesloft: {e}."
            )),
        }
    }

    async fn upsert(&self, payload: &AccountRequest, domain: &str) -> Result<Outcome> {
        let name = payload.name().unwrap_or_default();
        let (saved, label) = match self.find_named(name, domain).await? {
            None => (self.client.create_account(payload).await?, "Created Account"),
            Some(existing) => {
                let id = existing
                    .id()
                    .ok_or_else(|| Error::crm(format!("Account {name} has no id")))?;
                (self.client.update_account(id, payload).await?, "Updated Account")
            }
        };

        Ok(
            Outcome::passed(format!("Successfully created or updated Salesloft account {name}."))
                .with_record(id_record("account", label, saved.id())),
        )
    }

    /// Delete the account named `name` on `domain`
    pub async fn delete(&self, name: &str, domain: &str) -> Outcome {
        self.remove(name, domain).await.unwrap_or_else(|e| {
            Outcome::error(format!(
                "There was an error deleting the account in Salesloft: {e}."
            ))
        })
    }

    async fn remove(&self, name: &str, domain: &str) -> Result<Outcome> {
        let Some(id) = self.find_named(name, domain).await?.and_then(|a| a.id()) else {
            return Ok(Outcome::error(format!(
                "Account {name} from {domain} domain not found."
            )));
        };

        self.client.delete_account(id, domain).await?;
        Ok(
            Outcome::passed(format!("Successfully deleted Salesloft account {name}."))
                .with_record(id_record("account", "Deleted Account", Some(id))),
        )
    }

    /// Check a field on the account named `name` on `domain`
    pub async fn check_field(&self, name: &str, domain: &str, check: FieldCheck<'_>) -> Outcome {
        let operator = match check.operator() {
            Ok(operator) => operator,
            Err(outcome) => return outcome,
        };

        match self.find_named(name, domain).await {
            Ok(Some(account)) => {
                let record = OutcomeRecord::new("account", "Checked Account", scalar_fields(&account));
                check.evaluate(operator, account.field_or_custom(check.field), record)
            }
            Ok(None) => Outcome::failed(format!("Account {name} from {domain} domain not found.")),
            Err(e) => Outcome::error(format!("There was an error checking the account field: {e}")),
        }
    }
}
