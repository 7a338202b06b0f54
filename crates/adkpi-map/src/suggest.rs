//! Fuzzy "did you mean" hints for unmapped headers.
//!
//! Uses Jaro-Winkler similarity between the normalized header and every known
//! alias. Hints are advisory and never rename a column.

use rapidfuzz::distance::jaro_winkler;

use adkpi_model::CanonicalField;

use crate::aliases::HeaderAliases;
use crate::utils::normalize_header;

/// Closest alias match for a header.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasSuggestion {
    pub alias: String,
    pub field: CanonicalField,
    pub score: f64,
}

/// Returns the best-scoring alias at or above `threshold`, if any.
///
/// Ties keep the alphabetically first alias.
pub fn closest_alias(
    aliases: &HeaderAliases,
    raw_header: &str,
    threshold: f64,
) -> Option<AliasSuggestion> {
    let normalized = normalize_header(raw_header);
    if normalized.is_empty() {
        return None;
    }
    let mut best: Option<AliasSuggestion> = None;
    for (alias, field) in aliases.entries() {
        let score = jaro_winkler::similarity(normalized.chars(), alias.chars());
        if score < threshold {
            continue;
        }
        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(AliasSuggestion {
                alias: alias.to_string(),
                field,
                score,
            });
        }
    }
    best
}
