//! Stream variant synthesis.
//!
//! Quality variants are derived from the canonical media URL by
//! appending a `quality` parameter; the provider serves all three
//! labels from the same base.

use serde::Serialize;

/// Quality labels offered for every video.
pub const QUALITIES: [&str; 3] = ["1080P", "720P", "480P"];

/// A playable stream variant.
#[derive(Debug, Clone, Serialize)]
pub struct StreamVariant {
    pub url: String,
    pub quality: String,
    pub subtitles: Vec<String>,
}

/// Derive the quality variants for a canonical media URL.
///
/// Uses `?` to attach the quality parameter unless the base already
/// carries a query string, in which case `&` is used. Total: an empty
/// base still yields all three entries.
pub fn synthesize(canonical_url: &str) -> Vec<StreamVariant> {
    let separator = if canonical_url.contains('?') { '&' } else { '?' };
    QUALITIES
        .iter()
        .map(|quality| StreamVariant {
            url: format!("{canonical_url}{separator}quality={quality}"),
            quality: quality.to_string(),
            subtitles: Vec::new(),
        })
        .collect()
}
