//! Write payloads sent to the CRM
//!
//! Account and person payloads are shaped from free-form field maps: known
//! writeable fields go at the top level, everything else lands in
//! `custom_fields`.

use crate::constants::CUSTOM_FIELDS_KEY;
use crate::value_objects::record::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard writeable account fields
pub const ACCOUNT_STANDARD_FIELDS: &[&str] = &[
    "name",
    "domain",
    "conversational_name",
    "description",
    "phone",
    "website",
    "linkedin_url",
    "twitter_handle",
    "street",
    "city",
    "state",
    "postal_code",
    "country",
    "locale",
    "industry",
    "company_type",
    "founded",
    "revenue_range",
    "size",
    "do_not_contact",
    "custom_fields",
    "tags",
    "owner_id",
    "company_stage_id",
    "account_tier_id",
    "crm_id_type",
    "crm_id",
];

/// Standard writeable person fields
pub const PERSON_STANDARD_FIELDS: &[&str] = &[
    "email_address",
    "secondary_email_address",
    "personal_email_address",
    "first_name",
    "last_name",
    "phone",
    "phone_extension",
    "mobile_phone",
    "home_phone",
    "linkedin_url",
    "title",
    "city",
    "state",
    "country",
    "work_city",
    "work_state",
    "work_country",
    "person_company_name",
    "person_company_website",
    "person_company_industry",
    "job_seniority",
    "do_not_contact",
    "locale",
    "personal_website",
    "twitter_handle",
    "account_id",
    "owner_id",
    "import_id",
    "person_stage_id",
    "autotag_date",
];

/// Split `input` into standard fields and a `custom_fields` map
fn shape_payload(input: Map<String, Value>, standard: &[&str]) -> Map<String, Value> {
    let mut payload = Map::new();
    let mut custom = Map::new();

    for (key, value) in input {
        if standard.contains(&key.as_str()) {
            payload.insert(key, value);
        } else {
            custom.insert(key, value);
        }
    }

    // An explicit custom_fields map in the input is merged, not replaced
    match payload.get_mut(CUSTOM_FIELDS_KEY) {
        Some(Value::Object(existing)) => existing.extend(custom),
        _ => {
            payload.insert(CUSTOM_FIELDS_KEY.to_string(), Value::Object(custom));
        }
    }
    payload
}

/// Account create/update payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRequest(Map<String, Value>);

impl AccountRequest {
    /// Shape a payload from a free-form field map
    pub fn from_fields(input: Map<String, Value>) -> Self {
        Self(shape_payload(input, ACCOUNT_STANDARD_FIELDS))
    }

    /// Account domain, the lookup discriminator
    pub fn domain(&self) -> Option<&str> {
        self.0.get("domain").and_then(Value::as_str)
    }

    /// Account name
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Shaped payload
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Person create/update payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonRequest(Map<String, Value>);

impl PersonRequest {
    /// Shape a payload from a free-form field map
    pub fn from_fields(input: Map<String, Value>) -> Self {
        Self(shape_payload(input, PERSON_STANDARD_FIELDS))
    }

    /// Primary email address, the lookup discriminator
    pub fn email_address(&self) -> Option<&str> {
        self.0.get("email_address").and_then(Value::as_str)
    }

    /// Shaped payload
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Call logging payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Person the call was made to
    pub person_id: RecordId,
    /// Call sentiment
    pub sentiment: String,
    /// Call disposition
    pub disposition: String,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Parameters forwarded to the connected CRM
    #[serde(default)]
    pub crm_params: Map<String, Value>,
}
