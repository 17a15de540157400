//! Category derivation and the two recommendation match policies.
//!
//! The fulfiller-initiated path matches when the project's category
//! contains an interest as a substring. The project-initiated path matches
//! only when an interest equals the category exactly. The asymmetry is
//! observed product behavior and both policies are kept distinct.

/// Score written by the fulfiller-initiated (substring) path.
pub const FULFILLER_MATCH_SCORE: i32 = 80;

/// Score written by the project-initiated (exact) path.
pub const PROJECT_MATCH_SCORE: i32 = 90;

/// Category assigned when no title keyword matches.
pub const DEFAULT_CATEGORY: &str = "Social media";

/// Title keywords mapped to categories. Earlier entries take precedence.
const CATEGORY_KEYWORDS: &[(&[&str], &str)] = &[
    (&["canva"], "Canva design"),
    (&["social"], "Social media"),
    (&["email"], "Email marketing"),
    (&["e-commerce", "shopify"], "E-commerce / Shopify"),
];

/// Derive a project's category from keywords in its title.
pub fn derive_category(title: &str) -> &'static str {
    let title = title.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

/// Lowercase and trim a category. A missing category normalizes to `""`.
pub fn normalize_category(category: Option<&str>) -> String {
    category.unwrap_or_default().to_lowercase().trim().to_string()
}

/// Substring policy: the case-folded category contains any case-folded
/// interest. Interests are not trimmed on this path.
pub fn matches_by_substring(category: Option<&str>, interests: &[String]) -> bool {
    let category = category.unwrap_or_default().to_lowercase();
    interests
        .iter()
        .any(|interest| category.contains(&interest.to_lowercase()))
}

/// Exact policy: some interest, lowercased and trimmed, equals the already
/// normalized category.
pub fn matches_exactly(normalized_category: &str, interests: &[String]) -> bool {
    !normalized_category.is_empty()
        && interests
            .iter()
            .any(|interest| interest.to_lowercase().trim() == normalized_category)
}

/// Reason recorded by the substring path.
pub fn substring_match_reason(category: Option<&str>) -> String {
    let category = category.filter(|c| !c.is_empty()).unwrap_or("unknown");
    format!("Matched interest to category: {category}")
}

/// Reason recorded by the exact path, citing the matched interest.
pub fn exact_match_reason(normalized_category: &str) -> String {
    format!("Auto-match: builder interest \"{normalized_category}\"")
}
