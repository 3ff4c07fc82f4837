//! Operation outcomes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use slc_domain::value_objects::Record;

/// How an operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The operation did what was asked, or the check held
    Passed,
    /// The check did not hold, or the target was not found
    Failed,
    /// The operation could not be carried out
    Error,
}

/// Record attached to an outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Record identifier, e.g. "account"
    pub id: String,
    /// Human readable name, e.g. "Created Account"
    pub name: String,
    /// Record fields
    pub fields: Map<String, Value>,
}

impl OutcomeRecord {
    /// Create a record
    pub fn new(id: impl Into<String>, name: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields,
        }
    }
}

/// Result of an operation handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// How the operation ended
    pub status: OutcomeStatus,
    /// Message for the caller
    pub message: String,
    /// Record describing what was touched or checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<OutcomeRecord>,
}

impl Outcome {
    fn with_status(status: OutcomeStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            record: None,
        }
    }

    /// A passed outcome
    pub fn passed(message: impl Into<String>) -> Self {
        Self::with_status(OutcomeStatus::Passed, message)
    }

    /// A failed outcome
    pub fn failed(message: impl Into<String>) -> Self {
        Self::with_status(OutcomeStatus::Failed, message)
    }

    /// An errored outcome
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_status(OutcomeStatus::Error, message)
    }

    /// Attach a record
    pub fn with_record(mut self, record: OutcomeRecord) -> Self {
        self.record = Some(record);
        self
    }

    /// Whether the outcome passed
    pub fn is_passed(&self) -> bool {
        self.status == OutcomeStatus::Passed
    }
}

/// Record carrying only an `id` field
pub(crate) fn id_record(id: &str, name: &str, record_id: Option<u64>) -> OutcomeRecord {
    let mut fields = Map::new();
    if let Some(record_id) = record_id {
        fields.insert("id".to_string(), Value::from(record_id));
    }
    OutcomeRecord::new(id, name, fields)
}

/// Top-level scalar fields of a record; nulls, objects and arrays dropped
pub(crate) fn scalar_fields(record: &Record) -> Map<String, Value> {
    record
        .fields()
        .iter()
        .filter(|(_, value)| !matches!(value, Value::Null | Value::Object(_) | Value::Array(_)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
