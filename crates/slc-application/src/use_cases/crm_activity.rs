//! CRM activity check
//!
//! The activity listing is unfiltered and never cached; this use case
//! narrows it to one person and one source before checking a field.

use std::sync::Arc;

use serde_json::Value;
use slc_domain::error::Result;
use slc_domain::ports::providers::CrmClient;
use slc_domain::value_objects::{Record, RecordId};

use super::FieldCheck;
use super::operators::{Operator, check_field};
use super::outcome::{Outcome, OutcomeRecord, scalar_fields};

/// CRM activity checks
pub struct CrmActivityService {
    client: Arc<dyn CrmClient>,
}

fn person_id(activity: &Record) -> Option<RecordId> {
    activity
        .get("person")
        .and_then(|person| person.get("id"))
        .and_then(Value::as_u64)
}

impl CrmActivityService {
    /// Create the service over `client`
    pub fn new(client: Arc<dyn CrmClient>) -> Self {
        Self { client }
    }

    /// Check a field on the single activity of `source` logged for `email`
    ///
    /// Passes only when exactly one of the person's activities from
    /// `source` satisfies the check; more than one is an error.
    pub async fn check_field(&self, email: &str, source: &str, check: FieldCheck<'_>) -> Outcome {
        let operator = match check.operator() {
            Ok(operator) => operator,
            Err(outcome) => return outcome,
        };

        self.check(email, source, operator, check)
            .await
            .unwrap_or_else(|e| {
                Outcome::error(format!("There was an error checking the crm activity field: {e}"))
            })
    }

    async fn check(
        &self,
        email: &str,
        source: &str,
        operator: Operator,
        check: FieldCheck<'_>,
    ) -> Result<Outcome> {
        let activities = self.client.list_crm_activities().await?;
        if activities.is_empty() {
            return Ok(Outcome::failed(format!(
                "No activities logged for source '{source}'."
            )));
        }

        let people = self.client.find_person_by_email(email).await?;
        let Some(id) = people.first().and_then(|p| p.id()) else {
            return Ok(Outcome::failed(format!("Person {email} not found.")));
        };

        let mut matching = Vec::new();
        for activity in activities.iter().filter(|a| {
            person_id(a) == Some(id) && a.get_str("activity_type") == Some(source)
        }) {
            match check_field(operator, check.field, activity.get(check.field), check.expectation) {
                Ok(assertion) if assertion.valid => matching.push((activity, assertion)),
                Ok(_) => {}
                Err(e) => return Ok(Outcome::error(e.to_string())),
            }
        }

        let expectation = check.expectation.unwrap_or_default();
        match matching.as_slice() {
            [] => Ok(Outcome::failed(format!(
                "There were no valid activities logged for source '{source}' with {} {operator} {expectation}.",
                check.field
            ))),
            [(activity, assertion)] => Ok(Outcome::passed(assertion.message.clone()).with_record(
                OutcomeRecord::new("crmActivity", "Checked CRM Activity", scalar_fields(activity)),
            )),
            _ => Ok(Outcome::error(format!(
                "There were more than one valid activities logged for source '{source}' with {} {operator} {expectation}.",
                check.field
            ))),
        }
    }
}
