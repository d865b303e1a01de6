//! AWS Lambda handler for single-debtor evaluations
//!
//! Accepts a monetary snapshot as JSON and returns the reduction estimate.
//! Address, contact and storage concerns stay with the caller.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::Datelike;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use rehabilitation_system::{
    CalculationResult, EligibilityConfig, EligibilityPolicy, LivingCostTable, MonetarySnapshot,
};
use serde::{Deserialize, Serialize};

/// Input snapshot for one evaluation
#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    pub total_debt: f64,

    pub monthly_income: f64,

    #[serde(default)]
    pub liquidation_value: f64,

    /// Household size (default: 1)
    #[serde(default = "default_dependents")]
    pub dependent_count: f64,

    /// Living cost table year (default: current year)
    #[serde(default)]
    pub year: Option<i32>,
}

fn default_dependents() -> f64 { 1.0 }

/// Output from the evaluation
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub living_cost_year: i32,
    pub living_cost: f64,
    #[serde(flatten)]
    pub result: CalculationResult,
    pub execution_time_us: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn cors_builder(status: u16) -> lambda_http::http::response::Builder {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message })?;
    Ok(cors_builder(status).body(Body::Text(body))?)
}

fn json_response(body: &EvaluationResponse) -> Result<Response<Body>, Error> {
    Ok(cors_builder(200).body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors_builder(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: EvaluationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let snapshot = match MonetarySnapshot::validated(
        request.total_debt,
        request.monthly_income,
        request.liquidation_value,
        request.dependent_count,
    ) {
        Ok(s) => s,
        Err(e) => return error_response(400, &e.to_string()),
    };

    let living_cost = match request.year {
        Some(year) => match LivingCostTable::for_year(year) {
            Ok(table) => table,
            Err(e) => return error_response(400, &e.to_string()),
        },
        None => LivingCostTable::for_year_or_latest(chrono::Utc::now().year()),
    };

    let policy = EligibilityPolicy::new(EligibilityConfig::with_living_cost(living_cost));
    let result = policy.evaluate(&snapshot);
    log::info!(
        "Evaluated snapshot: violation={}, consultation={}, rate={:.2}",
        result.liquidation_value_violation,
        result.needs_consultation,
        result.reduction_rate
    );

    let response = EvaluationResponse {
        living_cost_year: policy.config().living_cost.year,
        living_cost: policy.compute_living_cost(snapshot.effective_dependents()),
        result,
        execution_time_us: start.elapsed().as_micros() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
