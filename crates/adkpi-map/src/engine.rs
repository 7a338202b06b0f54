//! Column mapper: renames source headers to canonical field names.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use adkpi_model::{CanonicalField, CollisionPolicy, Diagnostic, NormalizationOptions};

use crate::aliases::HeaderAliases;
use crate::error::MappingError;
use crate::suggest::closest_alias;

/// A later source column that replaced an earlier one for the same field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCollision {
    pub field: CanonicalField,
    /// Position and header of the column that was dropped.
    pub replaced: (usize, String),
    /// Position and header of the column that now provides the field.
    pub winner: (usize, String),
}

/// Result of mapping one header row.
#[derive(Debug, Clone, Default)]
pub struct MappingResult {
    /// Per position: the canonical name on a hit, the original header otherwise.
    pub renamed: Vec<String>,
    /// Per position: the resolved canonical field, if any.
    pub targets: Vec<Option<CanonicalField>>,
    /// Original headers with no alias.
    pub unmapped: BTreeSet<String>,
    /// Last-write-wins replacements, in encounter order.
    pub collisions: Vec<HeaderCollision>,
    /// Closest known field for unmapped headers that resemble an alias.
    pub suggestions: BTreeMap<String, CanonicalField>,
    winners: BTreeMap<CanonicalField, usize>,
}

impl MappingResult {
    /// Position of the source column that provides `field` after collisions.
    pub fn source_position(&self, field: CanonicalField) -> Option<usize> {
        self.winners.get(&field).copied()
    }

    /// True when the column at `position` was overwritten by a later one.
    pub fn is_replaced(&self, position: usize) -> bool {
        self.collisions.iter().any(|c| c.replaced.0 == position)
    }

    pub fn mapped_fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.winners.keys().copied()
    }

    /// Advisory diagnostics: collisions first, then unmapped headers in source order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out: Vec<Diagnostic> = self
            .collisions
            .iter()
            .map(|c| Diagnostic::header_collision(c.field.as_str(), &c.replaced.1, &c.winner.1))
            .collect();
        let mut seen = BTreeSet::new();
        for (header, target) in self.renamed.iter().zip(&self.targets) {
            if target.is_none() && seen.insert(header.as_str()) {
                let suggestion = self
                    .suggestions
                    .get(header)
                    .map(|f| f.as_str().to_string());
                out.push(Diagnostic::unmapped_header(header, suggestion));
            }
        }
        out
    }
}

/// Maps arbitrary source headers onto the canonical vocabulary.
///
/// The mapper borrows an immutable [`HeaderAliases`] table, so one table can
/// serve any number of mappers concurrently.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMapper<'a> {
    aliases: &'a HeaderAliases,
    collision_policy: CollisionPolicy,
    suggest_threshold: f64,
}

impl<'a> ColumnMapper<'a> {
    pub fn new(aliases: &'a HeaderAliases) -> Self {
        Self::with_options(aliases, &NormalizationOptions::default())
    }

    pub fn with_options(aliases: &'a HeaderAliases, options: &NormalizationOptions) -> Self {
        Self {
            aliases,
            collision_policy: options.collision_policy,
            suggest_threshold: options.suggest_threshold,
        }
    }

    /// Renames headers via the alias table and reports the ones it could not map.
    ///
    /// Never fails under [`CollisionPolicy::LastWins`]; under
    /// [`CollisionPolicy::Reject`] the first collision is an error.
    pub fn map_headers<S: AsRef<str>>(&self, headers: &[S]) -> Result<MappingResult, MappingError> {
        let mut result = MappingResult::default();
        for (position, header) in headers.iter().enumerate() {
            let header = header.as_ref();
            match self.aliases.lookup(header) {
                Some(field) => {
                    debug!(header = %header, field = %field, "mapped header");
                    if let Some(previous) = result.winners.insert(field, position) {
                        let replaced = headers[previous].as_ref().to_string();
                        if self.collision_policy == CollisionPolicy::Reject {
                            return Err(MappingError::Collision {
                                field,
                                first: replaced,
                                second: header.to_string(),
                            });
                        }
                        warn!(field = %field, replaced = %replaced, winner = %header, "header collision, last column wins");
                        result.collisions.push(HeaderCollision {
                            field,
                            replaced: (previous, replaced),
                            winner: (position, header.to_string()),
                        });
                    }
                    result.renamed.push(field.as_str().to_string());
                    result.targets.push(Some(field));
                }
                None => {
                    if let Some(hint) = closest_alias(self.aliases, header, self.suggest_threshold) {
                        result.suggestions.insert(header.to_string(), hint.field);
                    }
                    result.unmapped.insert(header.to_string());
                    result.renamed.push(header.to_string());
                    result.targets.push(None);
                }
            }
        }
        Ok(result)
    }
}
