//! Fulfiller profile model and DTOs.

use buildmatch_core::types::{ProfileId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `fulfiller_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FulfillerProfile {
    pub id: ProfileId,
    pub interests: Vec<String>,
    pub current_skills: Vec<String>,
    pub desired_skills: Vec<String>,
    pub working_style: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The subset of a fulfiller profile the recommendation generator reads.
#[derive(Debug, Clone, FromRow)]
pub struct FulfillerInterests {
    pub id: ProfileId,
    pub interests: Vec<String>,
}

/// DTO replacing a fulfiller profile wholesale. Lists are expected to be
/// normalized by the caller.
#[derive(Debug, Clone, Default)]
pub struct UpsertFulfillerProfile {
    pub interests: Vec<String>,
    pub current_skills: Vec<String>,
    pub desired_skills: Vec<String>,
    pub working_style: Vec<String>,
}
