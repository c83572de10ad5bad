use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::ClaimRecord;
use crate::observability::{MetricsRegistry, TimingGuard};
use crate::rules::RuleSet;

use super::response::{AssessmentResponse, ErrorResponse, HealthResponse, ReadyResponse};

/// Shared application state.
pub struct AppState {
    /// Current rule set (updated via watch channel)
    pub ruleset_rx: watch::Receiver<Arc<RuleSet>>,

    /// Counters rendered by `/metrics`
    pub metrics: Arc<MetricsRegistry>,

    /// Application start time
    pub start_time: Instant,

    /// Application version
    pub version: String,

    /// Latency budget in milliseconds
    pub latency_budget_ms: u64,
}

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/claims/assess", post(handle_assess))
        .route("/health", get(handle_health))
        .route("/ready", get(handle_ready))
        .route("/metrics", get(handle_metrics))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle claim assessment requests.
///
/// The body is taken as a raw JSON value so that any well-formed JSON
/// reaches the engine; odd shapes decode to defaults.
async fn handle_assess(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let start = Instant::now();

    let claim = ClaimRecord::from_value(body);
    let ruleset = state.ruleset_rx.borrow().clone();

    let evaluation = {
        let _timer = TimingGuard::new(&state.metrics);
        ruleset.evaluate(&claim)
    };
    state.metrics.record_evaluation(&evaluation);

    let elapsed = start.elapsed();
    if elapsed.as_millis() > state.latency_budget_ms as u128 {
        warn!(
            latency_ms = elapsed.as_millis(),
            budget_ms = state.latency_budget_ms,
            "Assessment latency exceeded budget"
        );
    }

    info!(
        route = %evaluation.route(),
        rule_id = %evaluation.rule_id,
        missing_fields = evaluation.assessment.missing_fields.len(),
        latency_us = elapsed.as_micros(),
        "Claim assessed"
    );

    (
        StatusCode::OK,
        Json(AssessmentResponse::new(
            evaluation,
            ruleset.policy_version.clone(),
        )),
    )
}

/// Health check endpoint.
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let ruleset = state.ruleset_rx.borrow();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        policy_version: ruleset.policy_version.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Readiness check endpoint.
async fn handle_ready(State(state): State<Arc<AppState>>) -> axum::response::Response {
    let ruleset = state.ruleset_rx.borrow();

    if ruleset.is_empty() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::not_ready("No rules loaded")),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(ReadyResponse {
            ready: true,
            policy_version: ruleset.policy_version.clone(),
            rules: ruleset.len(),
        }),
    )
        .into_response()
}

/// Metrics endpoint (Prometheus format).
async fn handle_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rules = state.ruleset_rx.borrow().len();

    let metrics = format!(
        r#"# HELP claimroute_uptime_seconds Application uptime in seconds
# TYPE claimroute_uptime_seconds counter
claimroute_uptime_seconds {}

# HELP claimroute_rules Number of routing rules loaded
# TYPE claimroute_rules gauge
claimroute_rules {}

{}"#,
        state.start_time.elapsed().as_secs(),
        rules,
        state.metrics.to_prometheus(),
    );

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        metrics,
    )
}
