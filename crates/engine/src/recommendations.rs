//! Recommendation generator.
//!
//! Two entry points write recommendations with different match policies:
//! a fulfiller asking for work uses the loose substring match, a newly
//! posted project uses the exact match. Both upsert on the
//! `(fulfiller, project)` pair so re-running is harmless.

use buildmatch_core::error::CoreError;
use buildmatch_core::matching::{
    exact_match_reason, matches_by_substring, matches_exactly, normalize_category,
    substring_match_reason, FULFILLER_MATCH_SCORE, PROJECT_MATCH_SCORE,
};
use buildmatch_core::status::ProjectStatus;
use buildmatch_core::types::{DbId, ProfileId};
use buildmatch_db::models::recommendation::{RecommendedProject, UpsertRecommendation};
use buildmatch_db::repositories::{FulfillerProfileRepo, ProjectRepo, RecommendationRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{EngineError, EngineResult, Step, StoreResultExt};

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    /// Rows written, inserts and updates alike.
    pub created: u64,
    /// Why nothing was written, when that is the case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl GenerationOutcome {
    fn written(created: u64, empty_note: &str) -> Self {
        Self {
            created,
            note: (created == 0).then(|| empty_note.to_string()),
        }
    }

    fn skipped(note: &str) -> Self {
        Self {
            created: 0,
            note: Some(note.to_string()),
        }
    }
}

/// Pairs fulfillers with posted projects.
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// Recommend every posted project whose category contains one of the
    /// fulfiller's interests.
    pub async fn generate_for_fulfiller(
        pool: &PgPool,
        fulfiller_id: ProfileId,
    ) -> EngineResult<GenerationOutcome> {
        let profile = FulfillerProfileRepo::find_by_id(pool, fulfiller_id)
            .await
            .at(Step::LoadProfile)?
            .ok_or_else(|| CoreError::not_found("FulfillerProfile", fulfiller_id))?;

        if profile.interests.is_empty() {
            return Ok(GenerationOutcome::skipped("No interests selected"));
        }

        let projects = ProjectRepo::list_by_status(pool, ProjectStatus::Posted)
            .await
            .at(Step::LoadProjects)?;

        let rows: Vec<UpsertRecommendation> = projects
            .iter()
            .filter(|p| matches_by_substring(p.category.as_deref(), &profile.interests))
            .map(|p| UpsertRecommendation {
                fulfiller_id,
                project_id: p.id,
                score: FULFILLER_MATCH_SCORE,
                reason: substring_match_reason(p.category.as_deref()),
            })
            .collect();

        let created = RecommendationRepo::upsert_many(pool, &rows)
            .await
            .at(Step::WriteRecommendations)?;

        tracing::info!(
            fulfiller_id = %fulfiller_id,
            candidates = projects.len(),
            created,
            "Recommendations generated for fulfiller",
        );
        Ok(GenerationOutcome::written(created, "No matching posted projects"))
    }

    /// Recommend a posted project to every fulfiller holding an interest
    /// equal to its category.
    pub async fn generate_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> EngineResult<GenerationOutcome> {
        let project = ProjectRepo::find_by_id(pool, project_id)
            .await
            .at(Step::LoadProject)?
            .ok_or_else(|| CoreError::not_found("Project", project_id))?;

        if project.status() != Some(ProjectStatus::Posted) {
            return Ok(GenerationOutcome::skipped("Project is not posted"));
        }

        let category = normalize_category(project.category.as_deref());
        if category.is_empty() {
            return Ok(GenerationOutcome::skipped("Project has no category"));
        }

        let fulfillers = FulfillerProfileRepo::list_interests(pool)
            .await
            .at(Step::LoadFulfillers)?;

        let rows: Vec<UpsertRecommendation> = fulfillers
            .iter()
            .filter(|f| matches_exactly(&category, &f.interests))
            .map(|f| UpsertRecommendation {
                fulfiller_id: f.id,
                project_id,
                score: PROJECT_MATCH_SCORE,
                reason: exact_match_reason(&category),
            })
            .collect();

        let created = RecommendationRepo::upsert_many(pool, &rows)
            .await
            .at(Step::WriteRecommendations)?;

        tracing::info!(
            project_id,
            category = %category,
            candidates = fulfillers.len(),
            created,
            "Recommendations generated for project",
        );
        Ok(GenerationOutcome::written(created, "No fulfiller interests match"))
    }

    /// Regenerate the fulfiller's recommendations, then list the ones whose
    /// project is still `posted`.
    ///
    /// A fulfiller without a profile yet simply has nothing to regenerate.
    pub async fn list_for_fulfiller(
        pool: &PgPool,
        fulfiller_id: ProfileId,
    ) -> EngineResult<Vec<RecommendedProject>> {
        match Self::generate_for_fulfiller(pool, fulfiller_id).await {
            Ok(_) => {}
            Err(EngineError::Core(CoreError::NotFound { .. })) => {
                tracing::debug!(
                    fulfiller_id = %fulfiller_id,
                    "No fulfiller profile, skipping regeneration",
                );
            }
            Err(e) => return Err(e),
        }

        RecommendationRepo::list_for_fulfiller(pool, fulfiller_id)
            .await
            .at(Step::ListRecommendations)
    }
}
