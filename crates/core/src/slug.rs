//! Slug derivation for video identities.
//!
//! A video's id is derived from its title, so two sources reporting the
//! same title (modulo case and punctuation) resolve to the same cache
//! row. Titles differing only in punctuation collapsing to one slug is
//! accepted policy, not a defect.

/// Derive a slug identity from a title.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace, lowercase
/// 2. Expand `&` to `and`
/// 3. Strip apostrophes, double quotes, and backticks
/// 4. Collapse every run of non-alphanumeric characters to one hyphen
/// 5. Trim leading/trailing hyphens
///
/// Total and pure: the empty title maps to the empty slug, and a string
/// that is already a slug maps to itself.
pub fn slugify(title: &str) -> String {
    let mut expanded = String::with_capacity(title.len());
    for c in title.trim().chars() {
        match c {
            '&' => expanded.push_str("and"),
            '\'' | '"' | '`' => {}
            _ => expanded.extend(c.to_lowercase()),
        }
    }

    let mut slug = String::with_capacity(expanded.len());
    for c in expanded.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}
