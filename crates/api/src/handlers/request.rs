//! Handlers for claims and approval under `/projects/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use buildmatch_core::types::{DbId, ProfileId};
use buildmatch_engine::{AssignmentManager, ProjectLifecycle};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::access::RequireActiveFulfiller;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/requests`.
#[derive(Debug, Deserialize, Validate)]
pub struct ClaimBody {
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

/// Request body for `POST /projects/{id}/approve`.
#[derive(Debug, Deserialize)]
pub struct ApproveBody {
    pub fulfiller_id: ProfileId,
}

/// GET /api/v1/projects/{id}/requests
pub async fn list_for_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ProjectLifecycle::find_owned(&state.pool, auth.user_id, id).await?;
    let requests = AssignmentManager::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// POST /api/v1/projects/{id}/requests
pub async fn claim(
    RequireActiveFulfiller(auth): RequireActiveFulfiller,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ClaimBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;

    let request = AssignmentManager::claim(&state.pool, id, auth.user_id, body.note).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// POST /api/v1/projects/{id}/approve
pub async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ApproveBody>,
) -> AppResult<impl IntoResponse> {
    ProjectLifecycle::find_owned(&state.pool, auth.user_id, id).await?;

    let outcome = AssignmentManager::approve(
        &state.pool,
        id,
        body.fulfiller_id,
        state.config.approval_policy,
    )
    .await?;

    tracing::info!(
        project_id = id,
        requester_id = %auth.user_id,
        fulfiller_id = %body.fulfiller_id,
        "Approval accepted",
    );
    Ok(Json(DataResponse { data: outcome }))
}
