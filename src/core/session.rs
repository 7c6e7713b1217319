use log::debug;

use super::coerce::coerce_amount;
use super::engine::build_report;
use super::types::{BudgetField, BudgetInputs, BudgetReport};
use crate::error::BudgetError;

/// One user edit as it arrives from the form: a field and its raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldEdit {
    pub field: BudgetField,
    pub raw: String,
}

impl FieldEdit {
    pub fn new(field: BudgetField, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }

    pub fn parse(field_id: &str, raw: impl Into<String>) -> Result<Self, BudgetError> {
        Ok(Self::new(field_id.parse()?, raw))
    }
}

/// Holds the current input record. Each edit swaps in a new record rather than
/// mutating a field of the old one.
#[derive(Clone, Debug, Default)]
pub struct BudgetSession {
    inputs: BudgetInputs,
}

impl BudgetSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(inputs: BudgetInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &BudgetInputs {
        &self.inputs
    }

    pub fn apply(&mut self, edit: &FieldEdit) -> BudgetReport {
        let value = coerce_amount(&edit.raw);
        debug!("edit {} = {:?} -> {value}", edit.field, edit.raw);
        self.inputs = self.inputs.with(edit.field, value);
        self.report()
    }

    pub fn report(&self) -> BudgetReport {
        build_report(&self.inputs)
    }
}
