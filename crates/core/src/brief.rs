//! Project brief constants and validation.
//!
//! A brief is what a requester submits when posting a project. The
//! commitments it carries are recorded for both parties but not enforced.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::profile::validate_tags;

/// Timeline applied when the requester does not supply one.
pub const DEFAULT_TIMELINE: &str = "Up to 4 weeks";

/// Maximum title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Minimum goal length after trimming.
pub const MIN_GOAL_LENGTH: usize = 3;

/// Maximum goal length, in characters.
pub const MAX_GOAL_LENGTH: usize = 5_000;

/// Responsiveness and access commitments collected with a brief.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitments {
    /// Requester agrees to reply at least twice a week.
    pub responsiveness: Option<bool>,
    /// Requester is willing to grant non-sensitive access.
    pub access_ok: Option<bool>,
}

/// Validate the free-text parts of a brief.
pub fn validate_brief(
    title: &str,
    goal: &str,
    inputs_available: &[String],
    constraints: &[String],
) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }

    let goal_len = goal.trim().chars().count();
    if goal_len < MIN_GOAL_LENGTH {
        return Err(CoreError::Validation(format!(
            "goal must be at least {MIN_GOAL_LENGTH} characters"
        )));
    }
    if goal_len > MAX_GOAL_LENGTH {
        return Err(CoreError::Validation(format!(
            "goal must be at most {MAX_GOAL_LENGTH} characters"
        )));
    }

    validate_tags("inputs_available", inputs_available)?;
    validate_tags("constraints", constraints)?;
    Ok(())
}
