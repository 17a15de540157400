//! Project lifecycle effects: creation under the open-project cap, owner
//! transitions, and the per-role project listings.

use buildmatch_core::brief::{validate_brief, Commitments, DEFAULT_TIMELINE};
use buildmatch_core::error::CoreError;
use buildmatch_core::lifecycle::{check_capacity, validate_transition, DEFAULT_MAX_OPEN_PROJECTS};
use buildmatch_core::matching::derive_category;
use buildmatch_core::profile::normalize_tags;
use buildmatch_core::status::ProjectStatus;
use buildmatch_core::types::{DbId, ProfileId};
use buildmatch_db::models::project::{CreateProject, Project};
use buildmatch_db::repositories::ProjectRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{EngineResult, Step, StoreResultExt};
use crate::recommendations::{GenerationOutcome, RecommendationGenerator};

/// Limits applied when creating projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectLimits {
    pub max_open_projects: i64,
}

impl Default for ProjectLimits {
    fn default() -> Self {
        Self {
            max_open_projects: DEFAULT_MAX_OPEN_PROJECTS,
        }
    }
}

/// A requester's project brief as submitted.
#[derive(Debug, Clone, Default)]
pub struct ProjectBrief {
    pub title: String,
    pub goal: String,
    pub inputs_available: Vec<String>,
    pub constraints: Vec<String>,
    pub commitments: Commitments,
    pub timeline: Option<String>,
}

/// A freshly created project plus the outcome of its recommendation push.
///
/// The push never undoes the creation; its failure is reported in
/// `recommendation_error` instead.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedProject {
    pub project: Project,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<GenerationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_error: Option<String>,
}

/// Drives projects through `posted -> active -> completed | archived`.
pub struct ProjectLifecycle;

impl ProjectLifecycle {
    /// Validate and insert a new `posted` project, then recommend it.
    pub async fn create_project(
        pool: &PgPool,
        requester_id: ProfileId,
        brief: ProjectBrief,
        limits: ProjectLimits,
    ) -> EngineResult<CreatedProject> {
        let inputs_available = normalize_tags(&brief.inputs_available);
        let constraints = normalize_tags(&brief.constraints);
        validate_brief(&brief.title, &brief.goal, &inputs_available, &constraints)?;

        let open = ProjectRepo::count_open_for_requester(pool, requester_id)
            .await
            .at(Step::CountOpenProjects)?;
        check_capacity(open, limits.max_open_projects)?;

        let title = brief.title.trim().to_string();
        let timeline = brief
            .timeline
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TIMELINE.to_string());

        let input = CreateProject {
            requester_id,
            category: Some(derive_category(&title).to_string()),
            title,
            goal: brief.goal.trim().to_string(),
            inputs_available,
            constraints,
            commitments: brief.commitments,
            timeline: Some(timeline),
        };
        let project = ProjectRepo::create(pool, &input)
            .await
            .at(Step::InsertProject)?;

        tracing::info!(
            project_id = project.id,
            requester_id = %requester_id,
            category = project.category.as_deref().unwrap_or_default(),
            "Project created",
        );

        let (recommendations, recommendation_error) =
            match RecommendationGenerator::generate_for_project(pool, project.id).await {
                Ok(outcome) => (Some(outcome), None),
                Err(e) => {
                    tracing::error!(
                        project_id = project.id,
                        error = %e,
                        "Recommendation push failed for new project",
                    );
                    (None, Some(e.to_string()))
                }
            };

        Ok(CreatedProject {
            project,
            recommendations,
            recommendation_error,
        })
    }

    /// Load a project the requester owns.
    pub async fn find_owned(
        pool: &PgPool,
        requester_id: ProfileId,
        project_id: DbId,
    ) -> EngineResult<Project> {
        let project = Self::find(pool, project_id).await?;
        if project.requester_id != requester_id {
            return Err(CoreError::Forbidden("Only the project owner may do this".into()).into());
        }
        Ok(project)
    }

    /// Load a project visible to its owner or its assigned fulfiller.
    pub async fn find_for_participant(
        pool: &PgPool,
        profile_id: ProfileId,
        project_id: DbId,
    ) -> EngineResult<Project> {
        let project = Self::find(pool, project_id).await?;
        if !project.is_participant(profile_id) {
            return Err(CoreError::Forbidden("Not a participant in this project".into()).into());
        }
        Ok(project)
    }

    /// Archive a `posted` or `active` project.
    pub async fn archive_project(
        pool: &PgPool,
        requester_id: ProfileId,
        project_id: DbId,
    ) -> EngineResult<Project> {
        Self::transition_owned(pool, requester_id, project_id, ProjectStatus::Archived).await
    }

    /// Complete an `active` project.
    pub async fn complete_project(
        pool: &PgPool,
        requester_id: ProfileId,
        project_id: DbId,
    ) -> EngineResult<Project> {
        Self::transition_owned(pool, requester_id, project_id, ProjectStatus::Completed).await
    }

    /// A requester's non-terminal projects, newest first.
    pub async fn list_open_for_requester(
        pool: &PgPool,
        requester_id: ProfileId,
    ) -> EngineResult<Vec<Project>> {
        ProjectRepo::list_open_for_requester(pool, requester_id)
            .await
            .at(Step::LoadProjects)
    }

    /// `active` projects assigned to a fulfiller.
    pub async fn list_active_for_fulfiller(
        pool: &PgPool,
        fulfiller_id: ProfileId,
    ) -> EngineResult<Vec<Project>> {
        ProjectRepo::list_active_for_fulfiller(pool, fulfiller_id)
            .await
            .at(Step::LoadProjects)
    }

    async fn find(pool: &PgPool, project_id: DbId) -> EngineResult<Project> {
        let project = ProjectRepo::find_by_id(pool, project_id)
            .await
            .at(Step::LoadProject)?
            .ok_or_else(|| CoreError::not_found("Project", project_id))?;
        Ok(project)
    }

    async fn transition_owned(
        pool: &PgPool,
        requester_id: ProfileId,
        project_id: DbId,
        to: ProjectStatus,
    ) -> EngineResult<Project> {
        let project = Self::find_owned(pool, requester_id, project_id).await?;
        let from = current_status(&project)?;
        validate_transition(from, to)?;

        let updated = ProjectRepo::transition(pool, project_id, from, to)
            .await
            .at(Step::TransitionProject)?
            .ok_or_else(|| {
                CoreError::Conflict(format!(
                    "Project {project_id} changed status while moving from {from} to {to}"
                ))
            })?;

        tracing::info!(project_id, from = %from, to = %to, "Project status changed");
        Ok(updated)
    }
}

/// Decode a row's status id, treating an unknown id as corrupt data.
pub(crate) fn current_status(project: &Project) -> Result<ProjectStatus, CoreError> {
    project.status().ok_or_else(|| {
        CoreError::Internal(format!(
            "Project {} has unknown status id {}",
            project.id, project.status_id
        ))
    })
}
