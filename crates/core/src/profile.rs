//! Profile role selection and tag-list normalization.
//!
//! Tag lists (interests, skills, working style) arrive as free-form user
//! input. They are normalized here once so every writer stores the same
//! shape and the matchers never see blank tags.

use crate::error::CoreError;
use crate::status::ProfileRole;

/// Maximum number of tags kept in any one list.
pub const MAX_TAGS: usize = 32;

/// Maximum length of a single tag, in characters.
pub const MAX_TAG_LENGTH: usize = 100;

/// Outcome of a role selection against the currently stored role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSelection {
    /// No profile yet; create it with the requested role.
    Create,
    /// The profile already holds the requested role.
    Unchanged,
}

/// Decide what a role selection does. The role is immutable once set, so a
/// different role is a [`CoreError::Conflict`].
pub fn select_role(
    existing: Option<ProfileRole>,
    requested: ProfileRole,
) -> Result<RoleSelection, CoreError> {
    match existing {
        None => Ok(RoleSelection::Create),
        Some(current) if current == requested => Ok(RoleSelection::Unchanged),
        Some(current) => Err(CoreError::Conflict(format!(
            "Profile role is already '{current}' and cannot change to '{requested}'"
        ))),
    }
}

/// Trim each tag, drop blanks, and drop exact duplicates (first wins).
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Split a comma-separated skill string into normalized tags.
pub fn split_tag_list(raw: &str) -> Vec<String> {
    let parts: Vec<&str> = raw.split(',').collect();
    normalize_tags(&parts)
}

/// Reject tag lists that are too long or contain oversized tags.
pub fn validate_tags(field: &str, tags: &[String]) -> Result<(), CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "{field} may contain at most {MAX_TAGS} entries, got {}",
            tags.len()
        )));
    }
    if let Some(tag) = tags.iter().find(|t| t.chars().count() > MAX_TAG_LENGTH) {
        return Err(CoreError::Validation(format!(
            "{field} entry '{tag}' exceeds {MAX_TAG_LENGTH} characters"
        )));
    }
    Ok(())
}
