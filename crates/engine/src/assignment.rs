//! Assignment manager: fulfiller claims and the requester's approval.
//!
//! Approval runs three effects in one transaction:
//!
//! 1. `assign_project`: set the fulfiller and move the project to `active`
//! 2. `approve_request`: approve the fulfiller's request, if it exists
//! 3. `decline_siblings`: decline every other request on the project
//!
//! Each effect writes absolute state, so repeating an approval is a no-op.

use std::str::FromStr;

use buildmatch_core::error::CoreError;
use buildmatch_core::lifecycle::{validate_transition, OPEN_STATUSES};
use buildmatch_core::status::{ProfileRole, ProjectStatus};
use buildmatch_core::types::{DbId, ProfileId};
use buildmatch_db::models::project::Project;
use buildmatch_db::models::project_request::{CreateProjectRequest, ProjectRequest};
use buildmatch_db::repositories::{ProfileRepo, ProjectRepo, ProjectRequestRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{foreign_key_constraint, EngineError, EngineResult, Step, StoreResultExt};
use crate::lifecycle::current_status;

/// How approval treats a project that already has a fulfiller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPolicy {
    /// Approving another fulfiller on an `active` project reassigns it.
    #[default]
    Reassign,
    /// Only the first approval assigns; approving someone else afterwards
    /// is a conflict. Re-approving the same fulfiller stays a no-op.
    FirstWins,
}

impl ApprovalPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalPolicy::Reassign => "reassign",
            ApprovalPolicy::FirstWins => "first_wins",
        }
    }
}

impl FromStr for ApprovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reassign" => Ok(ApprovalPolicy::Reassign),
            "first_wins" | "first-wins" => Ok(ApprovalPolicy::FirstWins),
            other => Err(format!(
                "unknown approval policy '{other}', expected 'reassign' or 'first_wins'"
            )),
        }
    }
}

/// Result of a successful approval.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalOutcome {
    pub project: Project,
    /// The approved request, or `None` if the fulfiller never claimed.
    pub approved_request: Option<ProjectRequest>,
    /// Requests that changed to `declined` in this approval.
    pub declined: u64,
}

/// Records claims and approves one fulfiller per project.
pub struct AssignmentManager;

impl AssignmentManager {
    /// Approve `fulfiller_id` for `project_id`.
    ///
    /// A terminal project is never reopened and only a fulfiller profile
    /// can be assigned. Store failures name the step that failed; nothing is
    /// applied unless every step succeeds.
    pub async fn approve(
        pool: &PgPool,
        project_id: DbId,
        fulfiller_id: ProfileId,
        policy: ApprovalPolicy,
    ) -> EngineResult<ApprovalOutcome> {
        let mut tx = pool.begin().await.at(Step::Begin)?;

        let current = ProjectRepo::find_by_id_for_update(&mut *tx, project_id)
            .await
            .at(Step::AssignProject)?
            .ok_or_else(|| CoreError::not_found("Project", project_id))?;
        let from = current_status(&current)?;
        validate_transition(from, ProjectStatus::Active)?;

        let assignee = ProfileRepo::find_by_id_for_share(&mut *tx, fulfiller_id)
            .await
            .at(Step::LoadProfile)?
            .ok_or_else(|| CoreError::not_found("Profile", fulfiller_id))?;
        if assignee.role() != Some(ProfileRole::Fulfiller) {
            return Err(CoreError::Validation(format!(
                "Profile {fulfiller_id} is not a fulfiller"
            ))
            .into());
        }

        let previous = current.assigned_fulfiller_id;
        if policy == ApprovalPolicy::FirstWins
            && from == ProjectStatus::Active
            && previous != Some(fulfiller_id)
        {
            return Err(CoreError::Conflict(format!(
                "Project {project_id} already has an approved fulfiller"
            ))
            .into());
        }

        let project = match ProjectRepo::assign(&mut *tx, project_id, fulfiller_id, OPEN_STATUSES)
            .await
        {
            Ok(Some(project)) => project,
            Ok(None) => {
                return Err(CoreError::Conflict(format!(
                    "Project {project_id} changed status during approval"
                ))
                .into())
            }
            Err(e) if foreign_key_constraint(&e).is_some() => {
                return Err(CoreError::not_found("Profile", fulfiller_id).into())
            }
            Err(source) => {
                return Err(EngineError::Store {
                    step: Step::AssignProject,
                    source,
                })
            }
        };

        let approved_request = ProjectRequestRepo::approve(&mut *tx, project_id, fulfiller_id)
            .await
            .at(Step::ApproveRequest)?;

        let declined = ProjectRequestRepo::decline_others(&mut *tx, project_id, fulfiller_id)
            .await
            .at(Step::DeclineSiblings)?;

        tx.commit().await.at(Step::Commit)?;

        tracing::info!(
            project_id,
            fulfiller_id = %fulfiller_id,
            policy = policy.as_str(),
            reassigned = previous.is_some_and(|p| p != fulfiller_id),
            had_request = approved_request.is_some(),
            declined,
            "Project approved",
        );

        Ok(ApprovalOutcome {
            project,
            approved_request,
            declined,
        })
    }

    /// Record a fulfiller's `pending` claim on a project.
    ///
    /// A second claim by the same fulfiller is a conflict.
    pub async fn claim(
        pool: &PgPool,
        project_id: DbId,
        fulfiller_id: ProfileId,
        note: Option<String>,
    ) -> EngineResult<ProjectRequest> {
        let input = CreateProjectRequest {
            project_id,
            fulfiller_id,
            note: note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };

        let request = match ProjectRequestRepo::create(pool, &input).await {
            Ok(Some(request)) => request,
            Ok(None) => {
                return Err(CoreError::Conflict(format!(
                    "Fulfiller {fulfiller_id} already requested project {project_id}"
                ))
                .into())
            }
            Err(e) => {
                return Err(match foreign_key_constraint(&e) {
                    Some(c) if c.contains("fulfiller") => {
                        CoreError::not_found("Profile", fulfiller_id).into()
                    }
                    Some(_) => CoreError::not_found("Project", project_id).into(),
                    None => EngineError::Store {
                        step: Step::InsertRequest,
                        source: e,
                    },
                })
            }
        };

        tracing::info!(
            project_id,
            fulfiller_id = %fulfiller_id,
            request_id = request.id,
            "Project requested",
        );
        Ok(request)
    }

    /// A project's requests, oldest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> EngineResult<Vec<ProjectRequest>> {
        ProjectRequestRepo::list_for_project(pool, project_id)
            .await
            .at(Step::ListRequests)
    }
}
