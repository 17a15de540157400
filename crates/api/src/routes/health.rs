use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answered a ping.
    pub db_healthy: bool,
    /// Approval policy this instance runs with.
    pub approval_policy: &'static str,
}

/// GET /health
///
/// Answers 503 while the database is unreachable so load balancers stop
/// routing here; the body is the same in both cases.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = buildmatch_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check failed to reach the database");
    }

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        approval_policy: state.config.approval_policy.as_str(),
    };
    (code, Json(body))
}

/// Mount health check routes (root level, outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
