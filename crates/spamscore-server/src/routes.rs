//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use spamscore_core::ScoreResult;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::state::AppState;
use crate::telemetry::{ERRORS_TOTAL, PREDICTIONS_TOTAL, REQUESTS_TOTAL, SCORE_LATENCY_US};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the spam scoring service! Please POST to /score for predictions.";
pub const NO_TEXT_MESSAGE: &str = "No text provided in the request";
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing your request";

pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/score", post(score_endpoint))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> &'static str {
    WELCOME_MESSAGE
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Scoring request; fields other than `text` are ignored
#[derive(Debug, Deserialize)]
struct ScoreRequest {
    text: String,
}

async fn score_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, ApiError> {
    metrics::counter!(REQUESTS_TOTAL).increment(1);

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!("Request body too large");
            metrics::counter!(ERRORS_TOTAL, "kind" => "payload_too_large").increment(1);
            return Err(ApiError::PayloadTooLarge);
        }
        Err(rejection) => {
            warn!("No text provided in the request: {}", rejection.body_text());
            metrics::counter!(ERRORS_TOTAL, "kind" => "invalid_request").increment(1);
            return Err(ApiError::InvalidRequest);
        }
    };

    let start = Instant::now();
    let result = match state.scorer.score(&request.text) {
        Ok(result) => result,
        Err(e) => {
            error!("Error processing the request: {}", e);
            metrics::counter!(ERRORS_TOTAL, "kind" => e.kind()).increment(1);
            return Err(ApiError::Internal);
        }
    };
    metrics::histogram!(SCORE_LATENCY_US).record(start.elapsed().as_micros() as f64);
    metrics::counter!(PREDICTIONS_TOTAL, "prediction" => result.label()).increment(1);

    info!(
        "Prediction: {}, Propensity: {}",
        result.prediction, result.propensity
    );

    Ok(Json(result))
}

async fn fallback() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

/// Error responses; details stay in the server log
#[derive(Debug)]
enum ApiError {
    InvalidRequest,
    PayloadTooLarge,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidRequest => (StatusCode::BAD_REQUEST, NO_TEXT_MESSAGE),
            ApiError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
