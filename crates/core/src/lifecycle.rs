//! Project lifecycle rules.
//!
//! ```text
//! posted ──approve──> active ──complete──> completed
//!    │                  │ └──approve (re-approval)
//!    └──archive──┐      └──archive──> archived
//!                └──────────────────> archived
//! ```
//!
//! `completed` and `archived` are terminal: they admit no transition, are
//! excluded from capacity counting, and never receive recommendations.

use crate::error::CoreError;
use crate::status::ProjectStatus;

/// Default cap on a requester's simultaneously open projects.
pub const DEFAULT_MAX_OPEN_PROJECTS: i64 = 3;

/// Statuses that count toward the open-project cap.
pub const OPEN_STATUSES: &[ProjectStatus] = &[ProjectStatus::Posted, ProjectStatus::Active];

impl ProjectStatus {
    /// `completed` and `archived` are terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Archived)
    }

    /// Whether the status counts toward the requester's open-project cap.
    pub fn is_open(self) -> bool {
        OPEN_STATUSES.contains(&self)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// `active -> active` is allowed: it is the re-approval path, which
    /// overwrites the assignment under the default approval policy.
    pub fn can_transition_to(self, next: ProjectStatus) -> bool {
        use ProjectStatus::*;
        matches!(
            (self, next),
            (Posted, Active)
                | (Posted, Archived)
                | (Active, Active)
                | (Active, Completed)
                | (Active, Archived)
        )
    }
}

/// Validate a transition, returning [`CoreError::InvalidTransition`] if the
/// state machine forbids it.
pub fn validate_transition(from: ProjectStatus, to: ProjectStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: from.as_str(),
            to: to.as_str(),
        })
    }
}

/// Check the open-project cap before a creation.
///
/// This is a soft limit: the caller counts and inserts in separate
/// statements, so two concurrent creations may both pass.
pub fn check_capacity(open_count: i64, limit: i64) -> Result<(), CoreError> {
    if open_count >= limit {
        Err(CoreError::CapacityExceeded { limit })
    } else {
        Ok(())
    }
}
