//! URL slug derivation for subjects and courses.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid regex"));
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

/// Convert free text into a slug.
///
/// Lowercases, drops anything that is not an ASCII alphanumeric, whitespace,
/// `-` or `_`, collapses whitespace/hyphen runs into one `-`, and trims
/// leading and trailing `-`/`_`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = DISALLOWED_RE.replace_all(&lowered, "");
    let joined = SEPARATOR_RE.replace_all(kept.trim(), "-");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Resolve the slug to store: the supplied one (normalised) or one derived
/// from `source`. Fails when nothing usable remains.
pub fn resolve_slug(supplied: Option<&str>, source: &str) -> Result<String, CoreError> {
    let slug = match supplied.map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => slugify(explicit),
        None => slugify(source),
    };
    if slug.is_empty() {
        return Err(CoreError::Validation(format!(
            "Cannot derive a slug from '{source}'"
        )));
    }
    Ok(slug)
}
