//! Repository for the `recommendations` table.
//!
//! Rows are keyed on `(fulfiller_id, project_id)`; writing an existing pair
//! replaces its score and reason.

use buildmatch_core::status::ProjectStatus;
use buildmatch_core::types::{DbId, ProfileId};
use sqlx::PgPool;

use crate::models::recommendation::{Recommendation, RecommendedProject, UpsertRecommendation};

/// Column list for the `recommendations` table.
const COLUMNS: &str = "id, fulfiller_id, project_id, score, reason, created_at, updated_at";

/// Provides data access for recommendations.
pub struct RecommendationRepo;

impl RecommendationRepo {
    /// Upsert a batch of recommendations within a transaction.
    ///
    /// Returns the number of rows written, inserts and updates alike.
    pub async fn upsert_many(
        pool: &PgPool,
        rows: &[UpsertRecommendation],
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut written = 0;

        for row in rows {
            let result = sqlx::query(
                "INSERT INTO recommendations (fulfiller_id, project_id, score, reason) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (fulfiller_id, project_id) \
                 DO UPDATE SET score = EXCLUDED.score, reason = EXCLUDED.reason",
            )
            .bind(row.fulfiller_id)
            .bind(row.project_id)
            .bind(row.score)
            .bind(&row.reason)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        tracing::debug!(written, "Recommendations upserted");
        Ok(written)
    }

    /// Find the recommendation for a `(fulfiller, project)` pair.
    pub async fn find(
        pool: &PgPool,
        fulfiller_id: ProfileId,
        project_id: DbId,
    ) -> Result<Option<Recommendation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendations WHERE fulfiller_id = $1 AND project_id = $2"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(fulfiller_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Count a fulfiller's recommendations.
    pub async fn count_for_fulfiller(
        pool: &PgPool,
        fulfiller_id: ProfileId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM recommendations WHERE fulfiller_id = $1")
                .bind(fulfiller_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// List a fulfiller's recommended projects that are still `posted`,
    /// best score first, then newest project first.
    ///
    /// Assigned, completed and archived projects drop out of the listing.
    pub async fn list_for_fulfiller(
        pool: &PgPool,
        fulfiller_id: ProfileId,
    ) -> Result<Vec<RecommendedProject>, sqlx::Error> {
        sqlx::query_as::<_, RecommendedProject>(
            "SELECT \
                p.id AS project_id, p.title, p.goal, p.category, p.status_id, \
                r.score, r.reason, p.created_at \
             FROM recommendations r \
             JOIN projects p ON p.id = r.project_id \
             WHERE r.fulfiller_id = $1 AND p.status_id = $2 \
             ORDER BY r.score DESC, p.created_at DESC, p.id DESC",
        )
        .bind(fulfiller_id)
        .bind(ProjectStatus::Posted.id())
        .fetch_all(pool)
        .await
    }
}
