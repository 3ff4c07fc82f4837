//! Field check operators
//!
//! Field checks compare a record field against an expectation given as
//! text. Ordering operators accept numbers or dates (RFC 3339 timestamps or
//! plain `YYYY-MM-DD` dates); every other operator compares text, treating
//! two numeric strings as equal when their values are.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::Value;
use thiserror::Error;

/// Comparison applied by a field check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equal to the expectation
    Be,
    /// Not equal to the expectation
    NotBe,
    /// Contains the expectation as a substring
    Contain,
    /// Does not contain the expectation
    NotContain,
    /// Numerically or chronologically after the expectation
    BeGreaterThan,
    /// Numerically or chronologically before the expectation
    BeLessThan,
    /// Present and not empty
    BeSet,
    /// Absent, null or empty
    NotBeSet,
    /// Equal to one of a comma separated list
    BeOneOf,
    /// Equal to none of a comma separated list
    NotBeOneOf,
}

impl Operator {
    /// Every operator, in the order they are listed to users
    pub const ALL: [Operator; 10] = [
        Self::Be,
        Self::NotBe,
        Self::Contain,
        Self::NotContain,
        Self::BeGreaterThan,
        Self::BeLessThan,
        Self::BeSet,
        Self::NotBeSet,
        Self::BeOneOf,
        Self::NotBeOneOf,
    ];

    /// Operator phrase, e.g. "be greater than"
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Be => "be",
            Self::NotBe => "not be",
            Self::Contain => "contain",
            Self::NotContain => "not contain",
            Self::BeGreaterThan => "be greater than",
            Self::BeLessThan => "be less than",
            Self::BeSet => "be set",
            Self::NotBeSet => "not be set",
            Self::BeOneOf => "be one of",
            Self::NotBeOneOf => "not be one of",
        }
    }

    /// Whether the operator compares against an expected value
    pub fn needs_expectation(self) -> bool {
        !matches!(self, Self::BeSet | Self::NotBeSet)
    }

    /// Comma separated list of every operator phrase
    pub fn list() -> String {
        Self::ALL
            .iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| OperatorError::Unknown(s.to_string()))
    }
}

/// Field check failures that are not a simple mismatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorError {
    /// Operator phrase not recognised
    #[error("Unknown operator '{0}'.")]
    Unknown(String),

    /// Operator needs an expectation and none was given
    #[error("The operator '{0}' requires an expected value. Please provide one.")]
    MissingExpectation(Operator),

    /// Operands cannot be ordered
    #[error("Cannot check whether {actual} should {operator} {expected}: both values must be numbers or dates.")]
    InvalidOperand {
        /// The operator applied
        operator: Operator,
        /// Actual field value, as text
        actual: String,
        /// Expected value
        expected: String,
    },
}

/// Outcome of one field comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    /// Whether the field satisfied the operator
    pub valid: bool,
    /// Explanation suitable for the caller
    pub message: String,
}

/// Text form of a field value; absent and null read as "null"
fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn loosely_equal(actual: &str, expected: &str) -> bool {
    let (actual, expected) = (actual.trim(), expected.trim());
    match (actual.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(e)) => a == e,
        _ => actual == expected,
    }
}

fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).ok().or_else(|| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

fn order(actual: &str, expected: &str) -> Option<Ordering> {
    let (a, e) = (actual.trim(), expected.trim());
    if let (Ok(a), Ok(e)) = (a.parse::<f64>(), e.parse::<f64>()) {
        return a.partial_cmp(&e);
    }
    match (parse_date(a), parse_date(e)) {
        (Some(a), Some(e)) => Some(a.cmp(&e)),
        _ => None,
    }
}

/// Check `actual` against `expected` with `operator`
///
/// `field` only feeds the message.
pub fn check_field(
    operator: Operator,
    field: &str,
    actual: Option<&Value>,
    expected: Option<&str>,
) -> Result<Assertion, OperatorError> {
    let actual_text = text(actual);
    let expected = match (operator.needs_expectation(), expected) {
        (true, None) => return Err(OperatorError::MissingExpectation(operator)),
        (_, expected) => expected.unwrap_or_default(),
    };
    let one_of = || expected.split(',').any(|e| loosely_equal(&actual_text, e));
    let ordered = |wanted: Ordering| {
        order(&actual_text, expected)
            .map(|ordering| ordering == wanted)
            .ok_or_else(|| OperatorError::InvalidOperand {
                operator,
                actual: actual_text.clone(),
                expected: expected.to_string(),
            })
    };

    let valid = match operator {
        Operator::Be => loosely_equal(&actual_text, expected),
        Operator::NotBe => !loosely_equal(&actual_text, expected),
        Operator::Contain => is_set(actual) && actual_text.contains(expected),
        Operator::NotContain => !(is_set(actual) && actual_text.contains(expected)),
        Operator::BeGreaterThan => ordered(Ordering::Greater)?,
        Operator::BeLessThan => ordered(Ordering::Less)?,
        Operator::BeSet => is_set(actual),
        Operator::NotBeSet => !is_set(actual),
        Operator::BeOneOf => one_of(),
        Operator::NotBeOneOf => !one_of(),
    };

    let wanted = if operator.needs_expectation() {
        format!("{operator} {expected}")
    } else {
        operator.to_string()
    };
    let message = if valid {
        format!("Expected {field} to {wanted}, and it did (actual value: {actual_text}).")
    } else {
        format!("Expected {field} to {wanted}, but it was {actual_text}.")
    };

    Ok(Assertion { valid, message })
}
