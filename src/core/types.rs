use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BudgetError;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInputs {
    pub monthly_income: f64,
    pub rv_payment: f64,
    pub rv_parking: f64,
    pub car_payment: f64,
    pub car_insurance: f64,
    pub child_support: f64,
    pub phone_bill: f64,
    pub food: f64,
    pub retirement_percent: f64,
    pub primary_investment_monthly: f64,
    pub secondary_investment_monthly: f64,
}

impl Default for BudgetInputs {
    fn default() -> Self {
        Self {
            monthly_income: 3_988.0,
            rv_payment: 1_038.0,
            rv_parking: 1_150.0,
            car_payment: 236.0,
            car_insurance: 140.0,
            child_support: 800.0,
            phone_bill: 40.0,
            food: 400.0,
            retirement_percent: 4.0,
            primary_investment_monthly: 50.0,
            secondary_investment_monthly: 15.0,
        }
    }
}

impl BudgetInputs {
    /// All-zero record, the state of a form whose every entry is blank.
    #[cfg(test)]
    pub(crate) fn zeroed() -> Self {
        Self {
            monthly_income: 0.0,
            rv_payment: 0.0,
            rv_parking: 0.0,
            car_payment: 0.0,
            car_insurance: 0.0,
            child_support: 0.0,
            phone_bill: 0.0,
            food: 0.0,
            retirement_percent: 0.0,
            primary_investment_monthly: 0.0,
            secondary_investment_monthly: 0.0,
        }
    }

    /// Returns a new record with exactly `field` replaced by `value`.
    pub fn with(self, field: BudgetField, value: f64) -> Self {
        let mut next = self;
        *next.slot_mut(field) = value;
        next
    }

    pub fn get(&self, field: BudgetField) -> f64 {
        match field {
            BudgetField::MonthlyIncome => self.monthly_income,
            BudgetField::RvPayment => self.rv_payment,
            BudgetField::RvParking => self.rv_parking,
            BudgetField::CarPayment => self.car_payment,
            BudgetField::CarInsurance => self.car_insurance,
            BudgetField::ChildSupport => self.child_support,
            BudgetField::PhoneBill => self.phone_bill,
            BudgetField::Food => self.food,
            BudgetField::RetirementPercent => self.retirement_percent,
            BudgetField::PrimaryInvestmentMonthly => self.primary_investment_monthly,
            BudgetField::SecondaryInvestmentMonthly => self.secondary_investment_monthly,
        }
    }

    pub fn bills(&self) -> [f64; 7] {
        [
            self.rv_payment,
            self.rv_parking,
            self.car_payment,
            self.car_insurance,
            self.child_support,
            self.phone_bill,
            self.food,
        ]
    }

    fn slot_mut(&mut self, field: BudgetField) -> &mut f64 {
        match field {
            BudgetField::MonthlyIncome => &mut self.monthly_income,
            BudgetField::RvPayment => &mut self.rv_payment,
            BudgetField::RvParking => &mut self.rv_parking,
            BudgetField::CarPayment => &mut self.car_payment,
            BudgetField::CarInsurance => &mut self.car_insurance,
            BudgetField::ChildSupport => &mut self.child_support,
            BudgetField::PhoneBill => &mut self.phone_bill,
            BudgetField::Food => &mut self.food,
            BudgetField::RetirementPercent => &mut self.retirement_percent,
            BudgetField::PrimaryInvestmentMonthly => &mut self.primary_investment_monthly,
            BudgetField::SecondaryInvestmentMonthly => &mut self.secondary_investment_monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BudgetField {
    MonthlyIncome,
    RvPayment,
    RvParking,
    CarPayment,
    CarInsurance,
    ChildSupport,
    PhoneBill,
    Food,
    RetirementPercent,
    PrimaryInvestmentMonthly,
    SecondaryInvestmentMonthly,
}

impl BudgetField {
    pub const ALL: [BudgetField; 11] = [
        BudgetField::MonthlyIncome,
        BudgetField::RvPayment,
        BudgetField::RvParking,
        BudgetField::CarPayment,
        BudgetField::CarInsurance,
        BudgetField::ChildSupport,
        BudgetField::PhoneBill,
        BudgetField::Food,
        BudgetField::RetirementPercent,
        BudgetField::PrimaryInvestmentMonthly,
        BudgetField::SecondaryInvestmentMonthly,
    ];

    /// Wire identifier, matching the camelCase keys of [`BudgetInputs`].
    pub fn id(self) -> &'static str {
        match self {
            BudgetField::MonthlyIncome => "monthlyIncome",
            BudgetField::RvPayment => "rvPayment",
            BudgetField::RvParking => "rvParking",
            BudgetField::CarPayment => "carPayment",
            BudgetField::CarInsurance => "carInsurance",
            BudgetField::ChildSupport => "childSupport",
            BudgetField::PhoneBill => "phoneBill",
            BudgetField::Food => "food",
            BudgetField::RetirementPercent => "retirementPercent",
            BudgetField::PrimaryInvestmentMonthly => "primaryInvestmentMonthly",
            BudgetField::SecondaryInvestmentMonthly => "secondaryInvestmentMonthly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetField::MonthlyIncome => "Monthly income",
            BudgetField::RvPayment => "RV payment",
            BudgetField::RvParking => "RV parking spot",
            BudgetField::CarPayment => "Car payment",
            BudgetField::CarInsurance => "Car insurance",
            BudgetField::ChildSupport => "Child support",
            BudgetField::PhoneBill => "Phone bill",
            BudgetField::Food => "Food",
            BudgetField::RetirementPercent => "Retirement contribution (% of income)",
            BudgetField::PrimaryInvestmentMonthly => "My investment account",
            BudgetField::SecondaryInvestmentMonthly => "Dependent's investment account",
        }
    }
}

impl fmt::Display for BudgetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BudgetField {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetField::ALL
            .into_iter()
            .find(|field| field.id() == s)
            .ok_or_else(|| BudgetError::UnknownField(s.to_string()))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBand {
    Overspending,
    Tight,
    Balanced,
}

impl StatusBand {
    /// Same spelling as the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusBand::Overspending => "overspending",
            StatusBand::Tight => "tight",
            StatusBand::Balanced => "balanced",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            StatusBand::Overspending => "You're investing more than you can afford right now.",
            StatusBand::Tight => {
                "Tight after investing: still okay, but be careful with gas, food, and emergencies."
            }
            StatusBand::Balanced => "Balanced! You're investing and still keeping a safety buffer.",
        }
    }
}

pub const BILLS_EXCEED_INCOME_MESSAGE: &str = "Your bills are higher than your income.";

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedBudget {
    pub total_bills: f64,
    pub after_bills: f64,
    pub retirement_contribution: f64,
    pub employer_match: f64,
    pub after_retirement: f64,
    pub total_investments: f64,
    pub after_investing: f64,
    pub is_deficit_after_bills: bool,
    pub is_deficit_after_retirement: bool,
    pub is_deficit_after_investing: bool,
    pub status: StatusBand,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub inputs: BudgetInputs,
    pub derived: DerivedBudget,
    pub messages: Vec<&'static str>,
}
