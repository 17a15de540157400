//! Route definitions for the fulfiller's recommendations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recommendation;
use crate::state::AppState;

/// Routes mounted at `/recommendations`.
///
/// ```text
/// GET    /              -> list
/// POST   /generate      -> generate_for_fulfiller
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recommendation::list))
        .route("/generate", post(recommendation::generate_for_fulfiller))
}
