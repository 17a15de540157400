//! Role and subscription gates.
//!
//! Each extractor wraps [`AuthUser`], loads the caller's profile, and
//! rejects with 403 when the profile does not qualify. A caller who has
//! not selected a role yet is rejected the same way.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use buildmatch_core::error::CoreError;
use buildmatch_core::status::ProfileRole;
use buildmatch_db::models::profile::Profile;
use buildmatch_db::repositories::ProfileRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn load_profile(state: &AppState, user: &AuthUser) -> Result<Profile, AppError> {
    ProfileRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Select a role before using this endpoint".into(),
            ))
        })
}

/// Requires a `requester` profile. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn post_project(RequireRequester(user): RequireRequester) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireRequester(pub AuthUser);

impl FromRequestParts<AppState> for RequireRequester {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let profile = load_profile(state, &user).await?;
        if profile.role() != Some(ProfileRole::Requester) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Requester role required".into(),
            )));
        }
        Ok(RequireRequester(user))
    }
}

/// Requires a `fulfiller` profile whose subscription is active.
///
/// A fulfiller without an active subscription gets 403 so the client can
/// send them to the subscribe page.
pub struct RequireActiveFulfiller(pub AuthUser);

impl FromRequestParts<AppState> for RequireActiveFulfiller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let profile = load_profile(state, &user).await?;
        if profile.role() != Some(ProfileRole::Fulfiller) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Fulfiller role required".into(),
            )));
        }
        if !profile.has_active_subscription() {
            return Err(AppError::Core(CoreError::Forbidden(
                "An active subscription is required".into(),
            )));
        }
        Ok(RequireActiveFulfiller(user))
    }
}
