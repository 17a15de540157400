//! Recommendation model, upsert DTO, and the fulfiller listing view.

use buildmatch_core::status::StatusId;
use buildmatch_core::types::{DbId, ProfileId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recommendations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recommendation {
    pub id: DbId,
    pub fulfiller_id: ProfileId,
    pub project_id: DbId,
    pub score: i32,
    pub reason: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for writing a recommendation keyed on `(fulfiller_id, project_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertRecommendation {
    pub fulfiller_id: ProfileId,
    pub project_id: DbId,
    pub score: i32,
    pub reason: String,
}

/// A recommended, still unassigned project as shown to its fulfiller.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecommendedProject {
    pub project_id: DbId,
    pub title: String,
    pub goal: String,
    pub category: Option<String>,
    pub status_id: StatusId,
    pub score: i32,
    pub reason: String,
    pub created_at: Timestamp,
}
