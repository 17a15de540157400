//! Engine error type.
//!
//! Rule violations surface as [`CoreError`]; store failures carry the
//! [`Step`] that was executing so a caller can tell which effect failed.

use std::fmt;

use buildmatch_core::error::CoreError;

/// The store operation that was executing when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Begin,
    LoadProfile,
    LoadProject,
    LoadProjects,
    LoadFulfillers,
    WriteRecommendations,
    ListRecommendations,
    CountOpenProjects,
    InsertProject,
    TransitionProject,
    InsertProfile,
    UpsertFulfillerProfile,
    InsertRequest,
    ListRequests,
    UpdateSubscription,
    AssignProject,
    ApproveRequest,
    DeclineSiblings,
    Commit,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Begin => "begin",
            Step::LoadProfile => "load_profile",
            Step::LoadProject => "load_project",
            Step::LoadProjects => "load_projects",
            Step::LoadFulfillers => "load_fulfillers",
            Step::WriteRecommendations => "write_recommendations",
            Step::ListRecommendations => "list_recommendations",
            Step::CountOpenProjects => "count_open_projects",
            Step::InsertProject => "insert_project",
            Step::TransitionProject => "transition_project",
            Step::InsertProfile => "insert_profile",
            Step::UpsertFulfillerProfile => "upsert_fulfiller_profile",
            Step::InsertRequest => "insert_request",
            Step::ListRequests => "list_requests",
            Step::UpdateSubscription => "update_subscription",
            Step::AssignProject => "assign_project",
            Step::ApproveRequest => "approve_request",
            Step::DeclineSiblings => "decline_siblings",
            Step::Commit => "commit",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Store error during {step}: {source}")]
    Store {
        step: Step,
        #[source]
        source: sqlx::Error,
    },
}

impl EngineError {
    /// The failed step, for store errors.
    pub fn step(&self) -> Option<Step> {
        match self {
            EngineError::Store { step, .. } => Some(*step),
            EngineError::Core(_) => None,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Tag a store result with the step that produced it.
pub(crate) trait StoreResultExt<T> {
    fn at(self, step: Step) -> EngineResult<T>;
}

impl<T> StoreResultExt<T> for Result<T, sqlx::Error> {
    fn at(self, step: Step) -> EngineResult<T> {
        self.map_err(|source| EngineError::Store { step, source })
    }
}

/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// If `err` is a foreign-key violation, the name of the violated constraint.
pub(crate) fn foreign_key_constraint(err: &sqlx::Error) -> Option<String> {
    let db_err = err.as_database_error()?;
    if db_err.code().as_deref() != Some(FOREIGN_KEY_VIOLATION) {
        return None;
    }
    Some(db_err.constraint().unwrap_or_default().to_string())
}
