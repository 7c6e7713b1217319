use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::api::run_http_server;
use crate::core::{
    BILLS_EXCEED_INCOME_MESSAGE, BudgetField, BudgetReport, BudgetSession, FieldEdit,
};

#[derive(Parser, Debug)]
#[command(
    name = "budget-planner",
    about = "Monthly budget planner (bills + retirement match + investing leftover)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the planner page and JSON API
    Serve {
        #[arg(long, env = "BUDGET_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Print the derived budget for one set of entries
    Report(ReportArgs),
}

/// Each entry is taken as raw text and coerced like a form field; omitted
/// entries keep the session default.
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    #[arg(long, allow_hyphen_values = true)]
    monthly_income: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    rv_payment: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    rv_parking: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    car_payment: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    car_insurance: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    child_support: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    phone_bill: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    food: Option<String>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Retirement contribution in percent of income, e.g. 4"
    )]
    retirement_percent: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    primary_investment_monthly: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    secondary_investment_monthly: Option<String>,
    #[arg(long, help = "Print the JSON response instead of the text summary")]
    json: bool,
}

impl ReportArgs {
    fn raw(&self, field: BudgetField) -> Option<&str> {
        let raw = match field {
            BudgetField::MonthlyIncome => &self.monthly_income,
            BudgetField::RvPayment => &self.rv_payment,
            BudgetField::RvParking => &self.rv_parking,
            BudgetField::CarPayment => &self.car_payment,
            BudgetField::CarInsurance => &self.car_insurance,
            BudgetField::ChildSupport => &self.child_support,
            BudgetField::PhoneBill => &self.phone_bill,
            BudgetField::Food => &self.food,
            BudgetField::RetirementPercent => &self.retirement_percent,
            BudgetField::PrimaryInvestmentMonthly => &self.primary_investment_monthly,
            BudgetField::SecondaryInvestmentMonthly => &self.secondary_investment_monthly,
        };
        raw.as_deref()
    }

    pub fn edits(&self) -> Vec<FieldEdit> {
        BudgetField::ALL
            .into_iter()
            .filter_map(|field| self.raw(field).map(|raw| FieldEdit::new(field, raw)))
            .collect()
    }

    pub fn build_report(&self) -> BudgetReport {
        let mut session = BudgetSession::new();
        for edit in self.edits() {
            session.apply(&edit);
        }
        session.report()
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve { port } => run_http_server(port)
            .await
            .with_context(|| format!("HTTP server on port {port} failed")),
        Command::Report(args) => {
            let report = args.build_report();
            if args.json {
                let json = serde_json::to_string_pretty(&report)
                    .context("failed to serialize report")?;
                println!("{json}");
            } else {
                print!("{}", render_report(&report));
            }
            Ok(())
        }
    }
}

pub fn format_money(value: f64) -> String {
    // abs() so -0.0 renders as $0.00
    if value >= 0.0 {
        format!("${:.2}", value.abs())
    } else {
        format!("-${:.2}", value.abs())
    }
}

fn format_entry(field: BudgetField, value: f64) -> String {
    match field {
        BudgetField::RetirementPercent => format!("{value}%"),
        _ => format_money(value),
    }
}

fn aligned(rows: &[(&str, String)]) -> Vec<String> {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{label:<width$}  {value:>12}"))
        .collect()
}

pub fn render_report(report: &BudgetReport) -> String {
    let inputs = &report.inputs;
    let d = &report.derived;

    let entries: Vec<(&str, String)> = BudgetField::ALL
        .into_iter()
        .map(|field| (field.label(), format_entry(field, inputs.get(field))))
        .collect();

    let retirement_label = format!(
        "Retirement contribution ({}% of income)",
        inputs.retirement_percent
    );
    let summary: Vec<(&str, String)> = [
        ("Total bills", d.total_bills),
        ("Income after bills", d.after_bills),
        (retirement_label.as_str(), -d.retirement_contribution),
        ("Employer match (up to 4%)", d.employer_match),
        ("Left after bills + retirement", d.after_retirement),
        (
            BudgetField::PrimaryInvestmentMonthly.label(),
            -inputs.primary_investment_monthly,
        ),
        (
            BudgetField::SecondaryInvestmentMonthly.label(),
            -inputs.secondary_investment_monthly,
        ),
        ("Total investments", -d.total_investments),
        ("Final leftover after all investing", d.after_investing),
    ]
    .into_iter()
    .map(|(label, value)| (label, format_money(value)))
    .collect();

    let mut lines = aligned(&entries);
    lines.push(String::new());
    lines.extend(aligned(&summary));
    lines.push(String::new());
    if d.is_deficit_after_bills {
        lines.push(format!("[deficit] {BILLS_EXCEED_INCOME_MESSAGE}"));
    }
    lines.push(format!("[{}] {}", d.status.as_str(), d.status.message()));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StatusBand;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid args")
    }

    fn report_args(cli: Cli) -> ReportArgs {
        match cli.command {
            Command::Report(args) => args,
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn format_money_matches_planner_display() {
        assert_eq!(format_money(184.0), "$184.00");
        assert_eq!(format_money(-40.52), "-$40.52");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(-0.0), "$0.00");
        assert_eq!(format_money(1_234.567), "$1234.57");
    }

    #[test]
    fn serve_accepts_port_flag() {
        let cli = parse(&["budget-planner", "serve", "--port", "9000"]);
        assert!(matches!(cli.command, Command::Serve { port: 9000 }));
    }

    #[test]
    fn report_without_flags_uses_defaults() {
        let args = report_args(parse(&["budget-planner", "report"]));
        assert!(args.edits().is_empty());

        let report = args.build_report();
        assert_eq!(report.derived.status, StatusBand::Overspending);
        assert!((report.derived.after_investing + 40.52).abs() <= 1e-6);
    }

    #[test]
    fn report_flags_are_coerced_like_form_entries() {
        let args = report_args(parse(&[
            "budget-planner",
            "report",
            "--monthly-income",
            "1000",
            "--food",
            "-50",
            "--rv-payment",
            "not-a-number",
        ]));
        let report = args.build_report();

        assert_eq!(report.inputs.monthly_income, 1_000.0);
        assert_eq!(report.inputs.food, -50.0);
        assert_eq!(report.inputs.rv_payment, 0.0);
    }

    #[test]
    fn text_summary_lists_balances_and_messages() {
        let text = render_report(&ReportArgs::default().build_report());

        assert!(text.contains("Retirement contribution (4% of income)"));
        assert!(text.contains("-$159.52"));
        assert!(text.contains("$184.00"));
        assert!(text.contains("-$40.52"));
        assert!(text.contains(&format!(
            "[overspending] {}",
            StatusBand::Overspending.message()
        )));
        assert!(!text.contains("[deficit]"));
        assert!(text.ends_with(&format!("{}\n", StatusBand::Overspending.message())));
    }

    #[test]
    fn text_summary_echoes_every_entry_by_label() {
        let args = report_args(parse(&["budget-planner", "report", "--rv-parking", ""]));
        let text = render_report(&args.build_report());

        for field in BudgetField::ALL {
            assert!(text.contains(field.label()), "missing {}", field.label());
        }
        assert!(text.contains("$1038.00"));
        assert!(text.lines().any(|l| l.starts_with("RV parking spot") && l.ends_with("$0.00")));
        assert!(text.lines().any(|l| l.starts_with("Retirement contribution (% of income)") && l.ends_with("4%")));
    }

    #[test]
    fn text_summary_flags_bills_deficit() {
        let args = report_args(parse(&["budget-planner", "report", "--monthly-income", "500"]));
        let text = render_report(&args.build_report());

        assert!(text.contains(&format!("[deficit] {BILLS_EXCEED_INCOME_MESSAGE}")));
        assert!(text.contains("[overspending]"));
    }
}
