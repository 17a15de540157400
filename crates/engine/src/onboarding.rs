//! Profile onboarding: role selection and the fulfiller's interests.

use buildmatch_core::error::CoreError;
use buildmatch_core::profile::{
    normalize_tags, select_role, split_tag_list, validate_tags, RoleSelection,
};
use buildmatch_core::status::ProfileRole;
use buildmatch_core::types::ProfileId;
use buildmatch_db::models::fulfiller_profile::{FulfillerProfile, UpsertFulfillerProfile};
use buildmatch_db::models::profile::{CreateProfile, Profile};
use buildmatch_db::repositories::{FulfillerProfileRepo, ProfileRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{EngineResult, Step, StoreResultExt};

/// Raw fulfiller profile input. Skill entries may hold comma-separated
/// lists; they are split and normalized like the other tag lists.
#[derive(Debug, Clone, Default)]
pub struct FulfillerProfileInput {
    pub interests: Vec<String>,
    pub current_skills: Vec<String>,
    pub desired_skills: Vec<String>,
    pub working_style: Vec<String>,
}

/// A profile together with its fulfiller details, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetails {
    pub profile: Profile,
    pub fulfiller_profile: Option<FulfillerProfile>,
}

fn split_skills(entries: &[String]) -> Vec<String> {
    let joined: Vec<String> = entries.iter().flat_map(|e| split_tag_list(e)).collect();
    normalize_tags(&joined)
}

fn role_of(profile: &Profile) -> Result<ProfileRole, CoreError> {
    profile.role().ok_or_else(|| {
        CoreError::Internal(format!(
            "Profile {} has unknown role id {}",
            profile.id, profile.role_id
        ))
    })
}

/// Creates profiles and maintains fulfiller details.
pub struct Onboarding;

impl Onboarding {
    /// Create the caller's profile with `role`, or confirm the role it
    /// already holds. The role never changes once set.
    pub async fn select_role(
        pool: &PgPool,
        identity: ProfileId,
        role: ProfileRole,
    ) -> EngineResult<Profile> {
        let existing = ProfileRepo::find_by_id(pool, identity)
            .await
            .at(Step::LoadProfile)?;
        let current = existing.as_ref().map(role_of).transpose()?;

        match select_role(current, role)? {
            RoleSelection::Unchanged => {
                if let Some(profile) = existing {
                    return Ok(profile);
                }
            }
            RoleSelection::Create => {
                let input = CreateProfile { id: identity, role };
                if let Some(profile) = ProfileRepo::create(pool, &input)
                    .await
                    .at(Step::InsertProfile)?
                {
                    tracing::info!(profile_id = %identity, role = %role, "Profile created");
                    return Ok(profile);
                }
            }
        }

        // Lost a creation race: re-read and re-check against the winner.
        let profile = ProfileRepo::find_by_id(pool, identity)
            .await
            .at(Step::LoadProfile)?
            .ok_or_else(|| CoreError::not_found("Profile", identity))?;
        select_role(Some(role_of(&profile)?), role)?;
        Ok(profile)
    }

    /// Replace the caller's fulfiller profile. Requires the fulfiller role.
    pub async fn upsert_fulfiller_profile(
        pool: &PgPool,
        identity: ProfileId,
        input: FulfillerProfileInput,
    ) -> EngineResult<FulfillerProfile> {
        let profile = ProfileRepo::find_by_id(pool, identity)
            .await
            .at(Step::LoadProfile)?;
        let role = profile.as_ref().map(role_of).transpose()?;
        if role != Some(ProfileRole::Fulfiller) {
            return Err(CoreError::Forbidden(
                "Only fulfiller profiles have interests and skills".into(),
            )
            .into());
        }

        let upsert = UpsertFulfillerProfile {
            interests: normalize_tags(&input.interests),
            current_skills: split_skills(&input.current_skills),
            desired_skills: split_skills(&input.desired_skills),
            working_style: normalize_tags(&input.working_style),
        };
        validate_tags("interests", &upsert.interests)?;
        validate_tags("current_skills", &upsert.current_skills)?;
        validate_tags("desired_skills", &upsert.desired_skills)?;
        validate_tags("working_style", &upsert.working_style)?;

        let saved = FulfillerProfileRepo::upsert(pool, identity, &upsert)
            .await
            .at(Step::UpsertFulfillerProfile)?;

        tracing::info!(
            profile_id = %identity,
            interests = saved.interests.len(),
            "Fulfiller profile saved",
        );
        Ok(saved)
    }

    /// The caller's profile and fulfiller details.
    pub async fn get_profile(pool: &PgPool, identity: ProfileId) -> EngineResult<ProfileDetails> {
        let profile = ProfileRepo::find_by_id(pool, identity)
            .await
            .at(Step::LoadProfile)?
            .ok_or_else(|| CoreError::not_found("Profile", identity))?;
        let fulfiller_profile = FulfillerProfileRepo::find_by_id(pool, identity)
            .await
            .at(Step::LoadProfile)?;
        Ok(ProfileDetails {
            profile,
            fulfiller_profile,
        })
    }
}
