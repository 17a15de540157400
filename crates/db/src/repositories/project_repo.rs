//! Repository for the `projects` table.
//!
//! Status changes are conditional updates on the expected current status,
//! so a caller that lost a race sees `None` instead of clobbering state.

use buildmatch_core::lifecycle::OPEN_STATUSES;
use buildmatch_core::status::{ProjectStatus, StatusId};
use buildmatch_core::types::{DbId, ProfileId};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::project::{CreateProject, Project};

/// Column list for the `projects` table.
const COLUMNS: &str = "id, requester_id, title, goal, category, status_id, \
                       assigned_fulfiller_id, inputs_available, constraints, commitments, \
                       timeline, created_at, updated_at";

fn status_ids(statuses: &[ProjectStatus]) -> Vec<StatusId> {
    statuses.iter().map(|s| s.id()).collect()
}

/// Provides data access for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in `posted` status.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects \
                (requester_id, title, goal, category, status_id, \
                 inputs_available, constraints, commitments, timeline) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.requester_id)
            .bind(&input.title)
            .bind(&input.goal)
            .bind(&input.category)
            .bind(ProjectStatus::Posted.id())
            .bind(&input.inputs_available)
            .bind(&input.constraints)
            .bind(Json(&input.commitments))
            .bind(&input.timeline)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project and lock its row for the rest of the transaction.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Count a requester's projects that are `posted` or `active`.
    pub async fn count_open_for_requester(
        pool: &PgPool,
        requester_id: ProfileId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM projects WHERE requester_id = $1 AND status_id = ANY($2)",
        )
        .bind(requester_id)
        .bind(status_ids(OPEN_STATUSES))
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// List every project in the given status, oldest first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE status_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(status.id())
            .fetch_all(pool)
            .await
    }

    /// List a requester's non-terminal projects, newest first.
    pub async fn list_open_for_requester(
        pool: &PgPool,
        requester_id: ProfileId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE requester_id = $1 AND status_id = ANY($2) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(requester_id)
            .bind(status_ids(OPEN_STATUSES))
            .fetch_all(pool)
            .await
    }

    /// List `active` projects assigned to a fulfiller, newest first.
    pub async fn list_active_for_fulfiller(
        pool: &PgPool,
        fulfiller_id: ProfileId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE assigned_fulfiller_id = $1 AND status_id = $2 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(fulfiller_id)
            .bind(ProjectStatus::Active.id())
            .fetch_all(pool)
            .await
    }

    /// Assign a fulfiller and move the project to `active`.
    ///
    /// Only applies while the project is in one of `allowed`; returns `None`
    /// otherwise (or if the project does not exist).
    pub async fn assign(
        conn: &mut PgConnection,
        id: DbId,
        fulfiller_id: ProfileId,
        allowed: &[ProjectStatus],
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET assigned_fulfiller_id = $2, status_id = $3 \
             WHERE id = $1 AND status_id = ANY($4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(fulfiller_id)
            .bind(ProjectStatus::Active.id())
            .bind(status_ids(allowed))
            .fetch_optional(&mut *conn)
            .await
    }

    /// Move a project from `from` to `to`.
    ///
    /// Returns `None` if the project is no longer in `from`.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: ProjectStatus,
        to: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status_id = $3 \
             WHERE id = $1 AND status_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(from.id())
            .bind(to.id())
            .fetch_optional(pool)
            .await
    }
}
