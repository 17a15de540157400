//! Route definitions for the `/projects` resource.
//!
//! Claims, approval and project-initiated recommendation runs are nested
//! under `/projects/{id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project, recommendation, request};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// POST   /{id}/archive                      -> archive
/// POST   /{id}/complete                     -> complete
///
/// GET    /{id}/requests                     -> list_for_project
/// POST   /{id}/requests                     -> claim
/// POST   /{id}/approve                      -> approve
///
/// POST   /{id}/recommendations/generate     -> generate_for_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id))
        .route("/{id}/archive", post(project::archive))
        .route("/{id}/complete", post(project::complete))
        .route(
            "/{id}/requests",
            get(request::list_for_project).post(request::claim),
        )
        .route("/{id}/approve", post(request::approve))
        .route(
            "/{id}/recommendations/generate",
            post(recommendation::generate_for_project),
        )
}
