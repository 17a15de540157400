//! Route definitions for the caller's profile.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET    /me                -> get_me
/// POST   /me/role           -> select_role
/// PUT    /me/fulfiller      -> put_fulfiller
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile::get_me))
        .route("/me/role", post(profile::select_role))
        .route("/me/fulfiller", put(profile::put_fulfiller))
}
