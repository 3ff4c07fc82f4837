//! Person use cases

use std::sync::Arc;

use serde_json::{Map, Value};
use slc_domain::error::{Error, Result};
use slc_domain::ports::providers::CrmClient;
use slc_domain::value_objects::{PersonRequest, Record};

use super::FieldCheck;
use super::outcome::{Outcome, OutcomeRecord, id_record};

/// Person operations
///
/// People are identified by email address; the first match is used.
pub struct PersonService {
    client: Arc<dyn CrmClient>,
}

impl PersonService {
    /// Create the service over `client`
    pub fn new(client: Arc<dyn CrmClient>) -> Self {
        Self { client }
    }

    async fn find(&self, email: &str) -> Result<Option<Record>> {
        Ok(self
            .client
            .find_person_by_email(email)
            .await?
            .into_iter()
            .next())
    }

    /// Update the person with the payload's email address, or create them
    pub async fn create_or_update(&self, fields: Map<String, Value>) -> Outcome {
        let payload = PersonRequest::from_fields(fields);
        let Some(email) = payload.email_address() else {
            return Outcome::error(
                "An email_address is required to create or update a Salesloft person.",
            );
        };

        self.upsert(&payload, email).await.unwrap_or_else(|e| {
            Outcome::error(format!(
                "There was an error creating or updating the person in Salesloft: {e}."
            ))
        })
    }

    async fn upsert(&self, payload: &PersonRequest, email: &str) -> Result<Outcome> {
        let (saved, label) = match self.find(email).await? {
            None => (self.client.create_person(payload).await?, "Created Person"),
            Some(existing) => {
                let id = existing
                    .id()
                    .ok_or_else(|| Error::crm(format!("Person {email} has no id")))?;
                (self.client.update_person(id, payload).await?, "Updated Person")
            }
        };

        Ok(
            Outcome::passed(format!("Successfully created or updated Salesloft person {email}."))
                .with_record(id_record("person", label, saved.id())),
        )
    }

    /// Delete the person with `email`
    pub async fn delete(&self, email: &str) -> Outcome {
        self.remove(email).await.unwrap_or_else(|e| {
            Outcome::error(format!("There was an error deleting the person in Salesloft: {e}."))
        })
    }

    async fn remove(&self, email: &str) -> Result<Outcome> {
        let Some(id) = self.find(email).await?.and_then(|p| p.id()) else {
            return Ok(Outcome::error(format!("Person {email} not found.")));
        };

        self.client.delete_person(id, email).await?;
        Ok(
            Outcome::passed(format!("Successfully deleted Salesloft person {email}."))
                .with_record(id_record("person", "Deleted Person", Some(id))),
        )
    }

    /// Every scalar field of the person, custom fields merged in
    pub async fn discover(&self, email: &str) -> Outcome {
        match self.find(email).await {
            Ok(Some(person)) => Outcome::passed("Successfully discovered fields on person")
                .with_record(OutcomeRecord::new(
                    "discoverPerson",
                    "Discovered Person",
                    person.flattened(),
                )),
            Ok(None) => Outcome::failed(format!("Person {email} not found.")),
            Err(e) => Outcome::error(format!("There was an error checking the person: {e}")),
        }
    }

    /// Check a field on the person with `email`
    pub async fn check_field(&self, email: &str, check: FieldCheck<'_>) -> Outcome {
        let operator = match check.operator() {
            Ok(operator) => operator,
            Err(outcome) => return outcome,
        };

        match self.find(email).await {
            Ok(Some(person)) => {
                let record = OutcomeRecord::new("person", "Checked Person", person.flattened());
                check.evaluate(operator, person.field_or_custom(check.field), record)
            }
            Ok(None) => Outcome::failed(format!("Person {email} not found.")),
            Err(e) => Outcome::error(format!("There was an error checking the person field: {e}")),
        }
    }
}
