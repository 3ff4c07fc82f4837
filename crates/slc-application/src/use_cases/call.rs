//! Call logging use case

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Map;
use slc_domain::error::Result;
use slc_domain::ports::providers::CrmClient;
use slc_domain::value_objects::CallRequest;

use super::outcome::{Outcome, id_record};

/// A call to log against the person with `email`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallInput {
    /// Email address of the person called
    pub email: String,
    /// Call sentiment
    pub sentiment: String,
    /// Call disposition
    pub disposition: String,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Call logging
pub struct CallService {
    client: Arc<dyn CrmClient>,
}

impl CallService {
    /// Create the service over `client`
    pub fn new(client: Arc<dyn CrmClient>) -> Self {
        Self { client }
    }

    /// Log `input` against the person it names
    pub async fn create(&self, input: &CallInput) -> Outcome {
        self.log(input).await.unwrap_or_else(|e| {
            Outcome::error(format!("There was an error creating the call in Salesloft: {e}."))
        })
    }

    async fn log(&self, input: &CallInput) -> Result<Outcome> {
        let person = self.client.find_person_by_email(&input.email).await?;
        let Some(person_id) = person.first().and_then(|p| p.id()) else {
            return Ok(Outcome::error(format!("Person {} not found.", input.email)));
        };

        let request = CallRequest {
            person_id,
            sentiment: input.sentiment.clone(),
            disposition: input.disposition.clone(),
            notes: input.notes.clone(),
            crm_params: Map::new(),
        };
        let logged = self.client.create_call(&request).await?;

        Ok(Outcome::passed(format!(
            "Successfully created Salesloft call {} with disposition {} and sentiment {}.",
            input.email, input.disposition, input.sentiment
        ))
        .with_record(id_record("call", "Created Call", logged.id())))
    }
}
