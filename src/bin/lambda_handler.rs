//! AWS Lambda handler for the calculation engines
//!
//! Accepts a JSON request tagged with the calculator to run (`av`, `fie`,
//! or `deductible`) and returns the engine's result as JSON.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use benefits_calc::{
    analyze_deductibles, calculate_av, calculate_fie, AnalyzerInput, CalcError, CostComponents,
    PlanCostSharing, PlanData, TierConfig,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

/// Calculation request, dispatched on the `calculator` field
#[derive(Debug, Deserialize)]
#[serde(tag = "calculator", rename_all = "lowercase")]
pub enum CalculationRequest {
    Av {
        plan: PlanCostSharing,
    },
    Fie {
        plans: Vec<PlanData>,
        costs: CostComponents,
        #[serde(default = "default_tier_count", rename = "tierCount")]
        tier_count: u32,
    },
    Deductible {
        #[serde(flatten)]
        input: AnalyzerInput,
    },
}

fn default_tier_count() -> u32 {
    4
}

#[derive(Debug, Serialize)]
struct CalculationResponse<T: Serialize> {
    result: T,
    execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    let body = serde_json::to_string(&ErrorBody {
        error: message.to_string(),
    })
    .unwrap_or_else(|_| r#"{"error":"internal serialization failure"}"#.to_string());
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body))
        .unwrap()
}

fn json_response<T: Serialize>(body: &CalculationResponse<T>) -> Response<Body> {
    match serde_json::to_string(body) {
        Ok(text) => Response::builder()
            .status(200)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Text(text))
            .unwrap(),
        Err(e) => error_response(500, &format!("Failed to serialize result: {}", e)),
    }
}

/// Validation failures are the caller's fault; everything the engines
/// return maps to a 400 with the field-level message.
fn calc_error_response(err: CalcError) -> Response<Body> {
    error_response(400, &err.to_string())
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: CalculationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let response = match request {
        CalculationRequest::Av { plan } => match calculate_av(&plan) {
            Ok(result) => json_response(&CalculationResponse {
                result,
                execution_time_ms: start.elapsed().as_millis() as u64,
            }),
            Err(e) => calc_error_response(e),
        },
        CalculationRequest::Fie {
            plans,
            costs,
            tier_count,
        } => {
            let config = match TierConfig::from_tier_count(tier_count) {
                Ok(c) => c,
                Err(e) => return Ok(calc_error_response(e)),
            };
            match calculate_fie(&plans, &costs, &config) {
                Ok(result) => json_response(&CalculationResponse {
                    result,
                    execution_time_ms: start.elapsed().as_millis() as u64,
                }),
                Err(e) => calc_error_response(e),
            }
        }
        CalculationRequest::Deductible { input } => match analyze_deductibles(&input) {
            Ok(result) => json_response(&CalculationResponse {
                result,
                execution_time_ms: start.elapsed().as_millis() as u64,
            }),
            Err(e) => calc_error_response(e),
        },
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
