//! Repository for the `fulfiller_profiles` table.

use buildmatch_core::types::ProfileId;
use sqlx::PgPool;

use crate::models::fulfiller_profile::{
    FulfillerInterests, FulfillerProfile, UpsertFulfillerProfile,
};

/// Column list for the `fulfiller_profiles` table.
const COLUMNS: &str = "id, interests, current_skills, desired_skills, working_style, \
                       created_at, updated_at";

/// Provides data access for fulfiller profiles.
pub struct FulfillerProfileRepo;

impl FulfillerProfileRepo {
    /// Insert or wholesale-replace a fulfiller profile.
    pub async fn upsert(
        pool: &PgPool,
        id: ProfileId,
        input: &UpsertFulfillerProfile,
    ) -> Result<FulfillerProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO fulfiller_profiles \
                (id, interests, current_skills, desired_skills, working_style) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET \
                interests = EXCLUDED.interests, \
                current_skills = EXCLUDED.current_skills, \
                desired_skills = EXCLUDED.desired_skills, \
                working_style = EXCLUDED.working_style \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FulfillerProfile>(&query)
            .bind(id)
            .bind(&input.interests)
            .bind(&input.current_skills)
            .bind(&input.desired_skills)
            .bind(&input.working_style)
            .fetch_one(pool)
            .await
    }

    /// Find a fulfiller profile by its identity.
    pub async fn find_by_id(
        pool: &PgPool,
        id: ProfileId,
    ) -> Result<Option<FulfillerProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fulfiller_profiles WHERE id = $1");
        sqlx::query_as::<_, FulfillerProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the interests of every fulfiller profile.
    pub async fn list_interests(pool: &PgPool) -> Result<Vec<FulfillerInterests>, sqlx::Error> {
        sqlx::query_as::<_, FulfillerInterests>(
            "SELECT id, interests FROM fulfiller_profiles ORDER BY created_at, id",
        )
        .fetch_all(pool)
        .await
    }
}
