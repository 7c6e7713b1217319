use thiserror::Error;

/// Errors raised at the edges of the planner. The calculator itself is total.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("unknown budget field: {0:?}")]
    UnknownField(String),
}
