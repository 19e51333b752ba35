//! Course tag normalisation.

use std::collections::BTreeSet;

/// Trim, lowercase and de-duplicate tags, dropping empty entries.
/// The result is sorted.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
