//! Handlers for the `/projects` resource and the fulfiller's project list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use buildmatch_core::brief::Commitments;
use buildmatch_core::types::DbId;
use buildmatch_engine::{ProjectBrief, ProjectLifecycle};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::access::{RequireActiveFulfiller, RequireRequester};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectBody {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 3, max = 5000))]
    pub goal: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub inputs_available: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub commitments: Commitments,
    #[validate(length(max = 100))]
    pub timeline: Option<String>,
}

impl From<CreateProjectBody> for ProjectBrief {
    fn from(body: CreateProjectBody) -> Self {
        Self {
            title: body.title,
            goal: body.goal,
            inputs_available: body.inputs_available,
            constraints: body.constraints,
            commitments: body.commitments,
            timeline: body.timeline,
        }
    }
}

/// POST /api/v1/projects
///
/// Creates a `posted` project and pushes recommendations for it. A failed
/// push is reported in the body; the project is still created.
pub async fn create(
    RequireRequester(auth): RequireRequester,
    State(state): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;

    let created = ProjectLifecycle::create_project(
        &state.pool,
        auth.user_id,
        body.into(),
        state.config.project_limits(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/projects
pub async fn list(
    RequireRequester(auth): RequireRequester,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectLifecycle::list_open_for_requester(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectLifecycle::find_for_participant(&state.pool, auth.user_id, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/archive
pub async fn archive(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectLifecycle::archive_project(&state.pool, auth.user_id, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/complete
pub async fn complete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectLifecycle::complete_project(&state.pool, auth.user_id, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/fulfiller/projects/active
pub async fn list_active_for_fulfiller(
    RequireActiveFulfiller(auth): RequireActiveFulfiller,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectLifecycle::list_active_for_fulfiller(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}
