//! Route definitions for billing provider callbacks.

use axum::routing::post;
use axum::Router;

use crate::handlers::billing;
use crate::state::AppState;

/// Routes mounted at `/billing`.
///
/// ```text
/// POST   /webhook           -> webhook (signature-authenticated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(billing::webhook))
}
