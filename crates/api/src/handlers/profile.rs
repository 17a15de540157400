//! Handlers for the caller's own profile (`/profiles/me`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use buildmatch_core::status::ProfileRole;
use buildmatch_engine::{FulfillerProfileInput, Onboarding};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /profiles/me/role`.
#[derive(Debug, Deserialize)]
pub struct SelectRoleInput {
    pub role: ProfileRole,
}

/// Request body for `PUT /profiles/me/fulfiller`.
#[derive(Debug, Deserialize, Validate)]
pub struct FulfillerProfileBody {
    #[serde(default)]
    #[validate(length(max = 32))]
    pub interests: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub current_skills: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub desired_skills: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub working_style: Vec<String>,
}

/// POST /api/v1/profiles/me/role
pub async fn select_role(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SelectRoleInput>,
) -> AppResult<impl IntoResponse> {
    let profile = Onboarding::select_role(&state.pool, auth.user_id, input.role).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/profiles/me
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let details = Onboarding::get_profile(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// PUT /api/v1/profiles/me/fulfiller
pub async fn put_fulfiller(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<FulfillerProfileBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;

    let input = FulfillerProfileInput {
        interests: body.interests,
        current_skills: body.current_skills,
        desired_skills: body.desired_skills,
        working_style: body.working_style,
    };
    let saved = Onboarding::upsert_fulfiller_profile(&state.pool, auth.user_id, input).await?;
    Ok(Json(DataResponse { data: saved }))
}
