//! Project request (claim) model and DTOs.

use buildmatch_core::status::{RequestStatus, StatusId};
use buildmatch_core::types::{DbId, ProfileId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `project_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRequest {
    pub id: DbId,
    pub project_id: DbId,
    pub fulfiller_id: ProfileId,
    pub status_id: StatusId,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectRequest {
    /// The request status, or `None` if the row holds an unknown id.
    pub fn status(&self) -> Option<RequestStatus> {
        RequestStatus::from_id(self.status_id)
    }
}

/// DTO for a fulfiller's claim. Always inserted as `pending`.
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    pub project_id: DbId,
    pub fulfiller_id: ProfileId,
    pub note: Option<String>,
}
