use super::types::{BILLS_EXCEED_INCOME_MESSAGE, BudgetInputs, BudgetReport, DerivedBudget, StatusBand};

/// Employer matches retirement contributions up to this share of income, in percent.
pub const EMPLOYER_MATCH_CAP_PERCENT: f64 = 4.0;

/// Leftover below this (but not negative) is reported as tight.
pub const SAFETY_BUFFER: f64 = 200.0;

pub fn compute(inputs: &BudgetInputs) -> DerivedBudget {
    let total_bills = inputs.bills().iter().sum::<f64>();
    let after_bills = inputs.monthly_income - total_bills;

    let retirement_contribution = percent_of(inputs.monthly_income, inputs.retirement_percent);
    // min(chosen, cap): a 2% contribution gets a 2% match, not 4%.
    let employer_match = percent_of(
        inputs.monthly_income,
        inputs.retirement_percent.min(EMPLOYER_MATCH_CAP_PERCENT),
    );
    let after_retirement = after_bills - retirement_contribution;

    let total_investments =
        inputs.primary_investment_monthly + inputs.secondary_investment_monthly;
    let after_investing = after_retirement - total_investments;

    DerivedBudget {
        total_bills,
        after_bills,
        retirement_contribution,
        employer_match,
        after_retirement,
        total_investments,
        after_investing,
        is_deficit_after_bills: after_bills < 0.0,
        is_deficit_after_retirement: after_retirement < 0.0,
        is_deficit_after_investing: after_investing < 0.0,
        status: classify(after_investing),
    }
}

/// Bands the final leftover. Only `after_investing` is ever compared against
/// [`SAFETY_BUFFER`]; the after-bills deficit is flagged separately.
pub fn classify(after_investing: f64) -> StatusBand {
    if after_investing < 0.0 {
        StatusBand::Overspending
    } else if after_investing < SAFETY_BUFFER {
        StatusBand::Tight
    } else {
        StatusBand::Balanced
    }
}

pub fn build_report(inputs: &BudgetInputs) -> BudgetReport {
    let derived = compute(inputs);
    let mut messages = Vec::with_capacity(2);
    if derived.is_deficit_after_bills {
        messages.push(BILLS_EXCEED_INCOME_MESSAGE);
    }
    messages.push(derived.status.message());

    BudgetReport {
        inputs: *inputs,
        derived,
        messages,
    }
}

fn percent_of(amount: f64, percent: f64) -> f64 {
    amount * percent / 100.0
}
