//! Project entity model and DTOs.

use buildmatch_core::brief::Commitments;
use buildmatch_core::status::{ProjectStatus, StatusId};
use buildmatch_core::types::{DbId, ProfileId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub requester_id: ProfileId,
    pub title: String,
    pub goal: String,
    pub category: Option<String>,
    pub status_id: StatusId,
    pub assigned_fulfiller_id: Option<ProfileId>,
    pub inputs_available: Vec<String>,
    pub constraints: Vec<String>,
    pub commitments: Json<Commitments>,
    pub timeline: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The lifecycle status, or `None` if the row holds an unknown id.
    pub fn status(&self) -> Option<ProjectStatus> {
        ProjectStatus::from_id(self.status_id)
    }

    /// Whether `profile_id` owns or is assigned to this project.
    pub fn is_participant(&self, profile_id: ProfileId) -> bool {
        self.requester_id == profile_id || self.assigned_fulfiller_id == Some(profile_id)
    }
}

/// DTO for inserting a new project. New projects always start `posted`.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub requester_id: ProfileId,
    pub title: String,
    pub goal: String,
    pub category: Option<String>,
    pub inputs_available: Vec<String>,
    pub constraints: Vec<String>,
    pub commitments: Commitments,
    pub timeline: Option<String>,
}
