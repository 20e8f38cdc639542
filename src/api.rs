//! HTTP API.
//!
//! `GET /api/{address}` (also under `/geo`) answers with `{}` when the
//! address is inside the ring, the distance in km when it is outside, or
//! one of the error strings below.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::evaluate::Evaluator;
use crate::geocoder::Geocoder;
use crate::models::{Evaluation, FailureKind};

pub const INVALID_ADDRESS: &str = "invalid address";
pub const BAD_REQUEST: &str = "Bad request";
pub const GENERAL_ERROR: &str = "General error!";

/// Application state shared across handlers
pub struct AppState<G> {
    pub evaluator: Evaluator<G>,
}

impl<G> AppState<G> {
    pub fn new(evaluator: Evaluator<G>) -> Self {
        Self { evaluator }
    }
}

pub fn router<G: Geocoder + 'static>(state: Arc<AppState<G>>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/geo", get(index_handler))
        .route("/geo/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/{address}", get(evaluate_handler::<G>))
        .route("/geo/api/{address}", get(evaluate_handler::<G>))
        .fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct IndexResponse {
    #[serde(rename = "Content-Type")]
    content_type: &'static str,
    #[serde(rename = "Name")]
    name: &'static str,
    #[serde(rename = "Link")]
    link: &'static str,
}

/// Service descriptor
async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        content_type: "application/json;charset=utf-8",
        name: "ringroad geo-API",
        link: "http://<your-domain:port>/api/<address>",
    })
}

/// Health check endpoint
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// JSON 500 for a handler that panicked
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// Evaluate one address
async fn evaluate_handler<G: Geocoder>(
    State(state): State<Arc<AppState<G>>>,
    Path(address): Path<String>,
) -> Response {
    let address = normalize_address(&address);
    if address.is_empty() {
        warn!("Rejecting empty address");
        return evaluation_response(&FailureKind::InvalidAddress.into());
    }

    let evaluation = state.evaluator.evaluate(&address).await;
    evaluation_response(&evaluation)
}

/// Status code for a failed evaluation
pub fn failure_status(kind: &FailureKind) -> StatusCode {
    match kind {
        FailureKind::InvalidAddress => StatusCode::UNPROCESSABLE_ENTITY,
        FailureKind::Remote { .. }
        | FailureKind::Transport(_)
        | FailureKind::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Client-facing message for a failed evaluation
pub fn failure_message(kind: &FailureKind) -> &'static str {
    match kind {
        FailureKind::InvalidAddress => INVALID_ADDRESS,
        FailureKind::Remote { .. } => BAD_REQUEST,
        FailureKind::Transport(_) | FailureKind::MalformedResponse(_) => GENERAL_ERROR,
    }
}

/// JSON body for an evaluation: `{}`, a number, or an error string
pub fn evaluation_body(evaluation: &Evaluation) -> Value {
    match evaluation {
        Evaluation::Inside => json!({}),
        Evaluation::Outside { distance_km } => json!(distance_km),
        Evaluation::Failure(kind) => json!(failure_message(kind)),
    }
}

pub fn evaluation_response(evaluation: &Evaluation) -> Response {
    let status = match evaluation {
        Evaluation::Failure(kind) => failure_status(kind),
        _ => StatusCode::OK,
    };
    (status, Json(evaluation_body(evaluation))).into_response()
}

/// Trim the address and undo UTF-8 that a client sent as Latin-1.
///
/// Some HTTP clients put raw UTF-8 bytes on the wire which then arrive
/// decoded one byte per char. When every char fits in a byte and those
/// bytes form valid UTF-8, the re-decoded text is used instead.
pub fn normalize_address(raw: &str) -> String {
    // Repair before trimming: U+0085 and U+00A0 are whitespace
    let repaired = if !raw.is_ascii() && raw.chars().all(|c| (c as u32) <= 0xFF) {
        let bytes: Vec<u8> = raw.chars().map(|c| c as u8).collect();
        String::from_utf8(bytes).ok()
    } else {
        None
    };
    repaired.as_deref().unwrap_or(raw).trim().to_string()
}
