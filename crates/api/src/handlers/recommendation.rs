//! Handlers for recommendation generation and listing.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use buildmatch_core::types::DbId;
use buildmatch_engine::{ProjectLifecycle, RecommendationGenerator};

use crate::error::AppResult;
use crate::middleware::access::RequireActiveFulfiller;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/recommendations/generate
pub async fn generate_for_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ProjectLifecycle::find_owned(&state.pool, auth.user_id, id).await?;
    let outcome = RecommendationGenerator::generate_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/recommendations/generate
pub async fn generate_for_fulfiller(
    RequireActiveFulfiller(auth): RequireActiveFulfiller,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let outcome = RecommendationGenerator::generate_for_fulfiller(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/recommendations
pub async fn list(
    RequireActiveFulfiller(auth): RequireActiveFulfiller,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = RecommendationGenerator::list_for_fulfiller(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: items }))
}
