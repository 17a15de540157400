//! Repository for the `project_requests` table.

use buildmatch_core::status::RequestStatus;
use buildmatch_core::types::{DbId, ProfileId};
use sqlx::{PgConnection, PgPool};

use crate::models::project_request::{CreateProjectRequest, ProjectRequest};

/// Column list for the `project_requests` table.
const COLUMNS: &str = "id, project_id, fulfiller_id, status_id, note, created_at, updated_at";

/// Provides data access for fulfiller claims on projects.
pub struct ProjectRequestRepo;

impl ProjectRequestRepo {
    /// Insert a `pending` request.
    ///
    /// Returns `None` if the fulfiller already has a request for this
    /// project. A missing project surfaces as a foreign-key error.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProjectRequest,
    ) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_requests (project_id, fulfiller_id, status_id, note) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (project_id, fulfiller_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(input.project_id)
            .bind(input.fulfiller_id)
            .bind(RequestStatus::Pending.id())
            .bind(&input.note)
            .fetch_optional(pool)
            .await
    }

    /// Find the request a fulfiller made for a project.
    pub async fn find(
        pool: &PgPool,
        project_id: DbId,
        fulfiller_id: ProfileId,
    ) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_requests WHERE project_id = $1 AND fulfiller_id = $2"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(project_id)
            .bind(fulfiller_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's requests, oldest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_requests \
             WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Mark the `(project, fulfiller)` request approved.
    ///
    /// Returns `None` when the fulfiller never claimed the project.
    pub async fn approve(
        conn: &mut PgConnection,
        project_id: DbId,
        fulfiller_id: ProfileId,
    ) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE project_requests SET status_id = $3 \
             WHERE project_id = $1 AND fulfiller_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(project_id)
            .bind(fulfiller_id)
            .bind(RequestStatus::Approved.id())
            .fetch_optional(&mut *conn)
            .await
    }

    /// Decline every other request on the project, whatever its status.
    ///
    /// Returns how many requests changed to `declined`.
    pub async fn decline_others(
        conn: &mut PgConnection,
        project_id: DbId,
        approved_fulfiller_id: ProfileId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_requests SET status_id = $3 \
             WHERE project_id = $1 AND fulfiller_id <> $2 AND status_id <> $3",
        )
        .bind(project_id)
        .bind(approved_fulfiller_id)
        .bind(RequestStatus::Declined.id())
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count the project's requests in `approved` status.
    pub async fn count_approved(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM project_requests WHERE project_id = $1 AND status_id = $2",
        )
        .bind(project_id)
        .bind(RequestStatus::Approved.id())
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
