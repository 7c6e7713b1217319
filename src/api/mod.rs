use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{BudgetField, BudgetInputs, BudgetReport, BudgetSession, FieldEdit, coerce_amount};
use crate::error::BudgetError;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// A form value as sent by a client: either already numeric or the raw text
/// of the entry, which still needs coercion.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn coerce(&self) -> f64 {
        match self {
            RawAmount::Number(v) if v.is_finite() => *v,
            RawAmount::Number(_) => 0.0,
            RawAmount::Text(raw) => coerce_amount(raw),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BudgetPayload {
    monthly_income: Option<RawAmount>,
    rv_payment: Option<RawAmount>,
    rv_parking: Option<RawAmount>,
    car_payment: Option<RawAmount>,
    car_insurance: Option<RawAmount>,
    child_support: Option<RawAmount>,
    phone_bill: Option<RawAmount>,
    food: Option<RawAmount>,
    retirement_percent: Option<RawAmount>,
    primary_investment_monthly: Option<RawAmount>,
    secondary_investment_monthly: Option<RawAmount>,
}

impl BudgetPayload {
    fn value(&self, field: BudgetField) -> Option<&RawAmount> {
        match field {
            BudgetField::MonthlyIncome => self.monthly_income.as_ref(),
            BudgetField::RvPayment => self.rv_payment.as_ref(),
            BudgetField::RvParking => self.rv_parking.as_ref(),
            BudgetField::CarPayment => self.car_payment.as_ref(),
            BudgetField::CarInsurance => self.car_insurance.as_ref(),
            BudgetField::ChildSupport => self.child_support.as_ref(),
            BudgetField::PhoneBill => self.phone_bill.as_ref(),
            BudgetField::Food => self.food.as_ref(),
            BudgetField::RetirementPercent => self.retirement_percent.as_ref(),
            BudgetField::PrimaryInvestmentMonthly => self.primary_investment_monthly.as_ref(),
            BudgetField::SecondaryInvestmentMonthly => self.secondary_investment_monthly.as_ref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EditPayload {
    inputs: BudgetPayload,
    field: String,
    raw: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/budget", get(budget_get_handler).post(budget_post_handler))
        .route("/api/edit", post(edit_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("budget planner listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn budget_get_handler(Query(payload): Query<BudgetPayload>) -> Response {
    budget_handler_impl(payload)
}

async fn budget_post_handler(Json(payload): Json<BudgetPayload>) -> Response {
    budget_handler_impl(payload)
}

fn budget_handler_impl(payload: BudgetPayload) -> Response {
    let report = BudgetSession::with_inputs(inputs_from_payload(&payload)).report();
    debug!(
        "computed budget: after investing {:.2} ({:?})",
        report.derived.after_investing, report.derived.status
    );
    json_response(StatusCode::OK, report)
}

async fn edit_handler(Json(payload): Json<EditPayload>) -> Response {
    match apply_edit_payload(payload) {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

/// Overlays the payload onto the session defaults; absent keys keep their default.
fn inputs_from_payload(payload: &BudgetPayload) -> BudgetInputs {
    BudgetField::ALL
        .into_iter()
        .fold(BudgetInputs::default(), |inputs, field| {
            match payload.value(field) {
                Some(raw) => inputs.with(field, raw.coerce()),
                None => inputs,
            }
        })
}

fn apply_edit_payload(payload: EditPayload) -> Result<BudgetReport, BudgetError> {
    let edit = FieldEdit::parse(&payload.field, payload.raw)?;
    let mut session = BudgetSession::with_inputs(inputs_from_payload(&payload.inputs));
    Ok(session.apply(&edit))
}

#[cfg(test)]
fn budget_payload_from_json(json: &str) -> Result<BudgetPayload, String> {
    serde_json::from_str::<BudgetPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))
}
