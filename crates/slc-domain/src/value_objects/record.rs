//! CRM records
//!
//! Records are kept as loosely typed JSON maps: the CRM returns dynamic
//! and custom fields that no fixed struct could describe.

use crate::constants::{CUSTOM_FIELDS_KEY, RECORD_ID_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric CRM identifier
pub type RecordId = u64;

/// A single record returned by the CRM
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wrap a field map
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Record id, if present and numeric
    pub fn id(&self) -> Option<RecordId> {
        self.0.get(RECORD_ID_FIELD).and_then(Value::as_u64)
    }

    /// Top-level field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Top-level string field
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Field value, falling back to `custom_fields` when absent at top level
    pub fn field_or_custom(&self, field: &str) -> Option<&Value> {
        self.get(field).or_else(|| {
            self.get(CUSTOM_FIELDS_KEY)
                .and_then(Value::as_object)
                .and_then(|custom| custom.get(field))
        })
    }

    /// Scalar top-level fields merged with custom fields
    ///
    /// Objects and arrays are dropped; custom fields win over top-level
    /// fields with the same name.
    pub fn flattened(&self) -> Map<String, Value> {
        let mut flat: Map<String, Value> = self
            .0
            .iter()
            .filter(|(_, v)| !v.is_object() && !v.is_array())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if let Some(custom) = self.get(CUSTOM_FIELDS_KEY).and_then(Value::as_object) {
            for (k, v) in custom {
                flat.insert(k.clone(), v.clone());
            }
        }
        flat
    }

    /// Borrow the field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the field map
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = crate::error::Error;

    fn try_from(value: Value) -> crate::error::Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(crate::error::Error::crm(format!(
                "expected a record object, got {other}"
            ))),
        }
    }
}
