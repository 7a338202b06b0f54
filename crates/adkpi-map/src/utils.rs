//! Utility functions for mapping operations.

/// Normalizes a header for alias lookup: strips a BOM, trims, lowercases and
/// collapses internal whitespace runs to a single space.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_spacing() {
        assert_eq!(normalize_header("  CUSTO "), "custo");
        assert_eq!(normalize_header("\u{feff}Nome   da Campanha"), "nome da campanha");
        assert_eq!(normalize_header("Impressões"), "impressões");
    }
}
