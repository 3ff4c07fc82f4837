//! Operation use cases
//!
//! Handlers for the operations the host exposes. Each one talks to the CRM
//! through the `CrmClient` port, so it runs the same against the remote
//! client or the caching client, and reports an [`Outcome`] instead of an
//! error.

pub mod account;
pub mod call;
pub mod crm_activity;
pub mod operators;
pub mod outcome;
pub mod person;

pub use account::AccountService;
pub use call::{CallInput, CallService};
pub use crm_activity::CrmActivityService;
pub use operators::{Assertion, Operator, OperatorError, check_field};
pub use outcome::{Outcome, OutcomeRecord, OutcomeStatus};
pub use person::PersonService;

use serde_json::Value;

/// A requested field comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCheck<'a> {
    /// Field to read, looked up in `custom_fields` when absent at top level
    pub field: &'a str,
    /// Operator phrase; "be" when absent
    pub operator: Option<&'a str>,
    /// Expected value, required by every operator but "be set"/"not be set"
    pub expectation: Option<&'a str>,
}

impl<'a> FieldCheck<'a> {
    /// Check `field` with `operator` against `expectation`
    pub fn new(field: &'a str, operator: Option<&'a str>, expectation: Option<&'a str>) -> Self {
        Self {
            field,
            operator,
            expectation,
        }
    }

    /// Resolve the operator, rejecting a missing expectation up front
    pub(crate) fn operator(&self) -> Result<Operator, Outcome> {
        let operator = self
            .operator
            .unwrap_or(Operator::Be.as_str())
            .parse::<Operator>()
            .map_err(|e| Outcome::error(format!("{e} Please provide one of: {}", Operator::list())))?;

        if operator.needs_expectation() && self.expectation.is_none() {
            return Err(Outcome::error(
                OperatorError::MissingExpectation(operator).to_string(),
            ));
        }
        Ok(operator)
    }

    /// Evaluate against `actual`, attaching `record` to the outcome
    pub(crate) fn evaluate(
        &self,
        operator: Operator,
        actual: Option<&Value>,
        record: OutcomeRecord,
    ) -> Outcome {
        match check_field(operator, self.field, actual, self.expectation) {
            Ok(assertion) if assertion.valid => Outcome::passed(assertion.message).with_record(record),
            Ok(assertion) => Outcome::failed(assertion.message).with_record(record),
            Err(e) => Outcome::error(e.to_string()),
        }
    }
}
