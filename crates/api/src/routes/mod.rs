pub mod billing;
pub mod fulfiller;
pub mod health;
pub mod profile;
pub mod project;
pub mod recommendation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /profiles/me                                     get profile (auth)
/// /profiles/me/role                                select role (auth)
/// /profiles/me/fulfiller                           upsert fulfiller profile (auth, fulfiller)
///
/// /projects                                        list, create (requester)
/// /projects/{id}                                   get (owner or assignee)
/// /projects/{id}/archive                           archive (owner)
/// /projects/{id}/complete                          complete (owner)
/// /projects/{id}/requests                          list (owner), claim (active fulfiller)
/// /projects/{id}/approve                           approve (owner)
/// /projects/{id}/recommendations/generate          push recommendations (owner)
///
/// /recommendations                                 list (active fulfiller)
/// /recommendations/generate                        regenerate (active fulfiller)
///
/// /fulfiller/projects/active                       assigned active projects (active fulfiller)
///
/// /billing/webhook                                 billing events (signed, no bearer)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profiles", profile::router())
        .nest("/projects", project::router())
        .nest("/recommendations", recommendation::router())
        .nest("/fulfiller", fulfiller::router())
        .nest("/billing", billing::router())
}
