//! Route definitions for the fulfiller's own project views.

use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/fulfiller`.
///
/// ```text
/// GET    /projects/active   -> list_active_for_fulfiller
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/projects/active", get(project::list_active_for_fulfiller))
}
