//! Advisory diagnostics describing best-effort normalization decisions.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Source header not found in the alias table; kept as passthrough text.
    UnmappedHeader,
    /// Two source headers resolved to the same canonical field.
    HeaderCollision,
    /// Canonical numeric field absent from the source; zero-filled.
    FieldDefaulted,
    /// Some cells of a numeric column could not be parsed and became 0.
    ValuesDefaulted,
    /// No date format parsed the whole column; dates marked missing.
    DateColumnUnparseable,
    /// Date column present but without any value.
    DateColumnEmpty,
}

/// A non-fatal message surfaced to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Column the diagnostic is about (source header or canonical name).
    pub column: String,
    pub message: String,
    /// Number of affected cells, when meaningful.
    pub count: Option<usize>,
    /// Closest known header for unmapped columns.
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn unmapped_header(header: &str, suggestion: Option<String>) -> Self {
        let mut message = format!("column `{header}` not recognised; kept as text");
        if let Some(target) = &suggestion {
            message.push_str(&format!(" (did you mean `{target}`?)"));
        }
        Self {
            kind: DiagnosticKind::UnmappedHeader,
            column: header.to_string(),
            message,
            count: None,
            suggestion,
        }
    }

    pub fn header_collision(field: &str, replaced: &str, winner: &str) -> Self {
        Self {
            kind: DiagnosticKind::HeaderCollision,
            column: field.to_string(),
            message: format!(
                "columns `{replaced}` and `{winner}` both map to `{field}`; `{winner}` wins"
            ),
            count: None,
            suggestion: None,
        }
    }

    pub fn field_defaulted(field: &str) -> Self {
        Self {
            kind: DiagnosticKind::FieldDefaulted,
            column: field.to_string(),
            message: format!("field `{field}` absent, defaulted to 0"),
            count: None,
            suggestion: None,
        }
    }

    pub fn values_defaulted(field: &str, count: usize) -> Self {
        Self {
            kind: DiagnosticKind::ValuesDefaulted,
            column: field.to_string(),
            message: format!("column `{field}`: {count} value(s) could not be parsed, defaulted to 0"),
            count: Some(count),
            suggestion: None,
        }
    }

    pub fn date_unparseable(header: &str, failed: usize) -> Self {
        Self {
            kind: DiagnosticKind::DateColumnUnparseable,
            column: header.to_string(),
            message: format!(
                "date column unparseable: no single format reads all values ({failed} rejected under the best format); dates marked missing"
            ),
            count: Some(failed),
            suggestion: None,
        }
    }

    pub fn date_empty(header: &str) -> Self {
        Self {
            kind: DiagnosticKind::DateColumnEmpty,
            column: header.to_string(),
            message: "date column has no values; dates marked missing".to_string(),
            count: None,
            suggestion: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered collection of diagnostics for one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.kind == kind)
    }

    /// The set of source headers that were not mapped.
    pub fn unmapped_headers(&self) -> BTreeSet<String> {
        self.of_kind(DiagnosticKind::UnmappedHeader)
            .map(|d| d.column.clone())
            .collect()
    }

    /// True when any diagnostic concerns `column`.
    pub fn mentions(&self, column: &str) -> bool {
        self.0.iter().any(|d| d.column == column)
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
