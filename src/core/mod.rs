mod coerce;
mod engine;
mod session;
mod types;

pub use coerce::coerce_amount;
pub use engine::{EMPLOYER_MATCH_CAP_PERCENT, SAFETY_BUFFER, build_report, classify, compute};
pub use session::{BudgetSession, FieldEdit};
pub use types::{
    BILLS_EXCEED_INCOME_MESSAGE, BudgetField, BudgetInputs, BudgetReport, DerivedBudget,
    StatusBand,
};
