//! The header alias table.
//!
//! Maps lower-cased, trimmed source header spellings (Portuguese and English
//! ad-platform exports, API field names) to exactly one canonical field. The
//! built-in table is constructed once per process and never mutated; overlays
//! produce a new value.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use adkpi_model::{CANONICAL_SCHEMA, CanonicalField};
use serde::Deserialize;
use tracing::debug;

use crate::error::MappingError;
use crate::utils::normalize_header;

use adkpi_model::CanonicalField as F;

const BUILTIN_ALIASES: &[(&str, CanonicalField)] = &[
    // campaign
    ("campaign name", F::Campaign),
    ("campaign_name", F::Campaign),
    ("campaign.name", F::Campaign),
    ("campanha", F::Campaign),
    ("nome da campanha", F::Campaign),
    // date
    ("day", F::Date),
    ("data", F::Date),
    ("dia", F::Date),
    ("date_start", F::Date),
    ("segments.date", F::Date),
    ("reporting starts", F::Date),
    ("início dos relatórios", F::Date),
    // cost
    ("spend", F::Cost),
    ("amount spent", F::Cost),
    ("amount spent (brl)", F::Cost),
    ("custo", F::Cost),
    ("gasto", F::Cost),
    ("investimento", F::Cost),
    ("valor gasto", F::Cost),
    ("valor usado", F::Cost),
    ("valor usado (brl)", F::Cost),
    // clicks
    ("cliques", F::Clicks),
    ("link clicks", F::Clicks),
    ("cliques no link", F::Clicks),
    ("clicks (all)", F::Clicks),
    ("cliques (todos)", F::Clicks),
    // impressions
    ("impressões", F::Impressions),
    ("impressoes", F::Impressions),
    ("impr.", F::Impressions),
    // conversions
    ("conversões", F::Conversions),
    ("conversoes", F::Conversions),
    ("results", F::Conversions),
    ("resultados", F::Conversions),
    ("leads", F::Conversions),
    // conversion value
    ("conv. value", F::ConversionValue),
    ("all conv. value", F::ConversionValue),
    ("purchase conversion value", F::ConversionValue),
    ("valor de conversão", F::ConversionValue),
    ("valor de conversão de compras", F::ConversionValue),
    // cpc
    ("avg. cpc", F::Cpc),
    ("avg_cpc", F::Cpc),
    ("average_cpc", F::Cpc),
    ("cpc médio", F::Cpc),
    ("cpc (cost per link click)", F::Cpc),
    ("cpc (custo por clique no link)", F::Cpc),
    // cpm
    ("avg. cpm", F::Cpm),
    ("avg_cpm", F::Cpm),
    ("average_cpm", F::Cpm),
    ("cpm médio", F::Cpm),
    ("cpm (cost per 1,000 impressions)", F::Cpm),
    ("cpm (custo por 1.000 impressões)", F::Cpm),
    // ctr
    ("ctr (all)", F::Ctr),
    ("ctr (todos)", F::Ctr),
    ("ctr (link click-through rate)", F::Ctr),
    ("ctr (taxa de cliques no link)", F::Ctr),
    ("taxa de cliques", F::Ctr),
    // frequency
    ("frequência", F::Frequency),
    ("frequencia", F::Frequency),
    // cost per conversion
    ("cost / conv.", F::CostPerConversion),
    ("cost per result", F::CostPerConversion),
    ("custo por resultado", F::CostPerConversion),
    ("custo por conversão", F::CostPerConversion),
    // passthrough text
    ("objetivo", F::Objective),
    ("delivery", F::CampaignDelivery),
    ("veiculação", F::CampaignDelivery),
    ("veiculação da campanha", F::CampaignDelivery),
    ("budget", F::CampaignBudget),
    ("orçamento", F::CampaignBudget),
    ("orçamento da campanha", F::CampaignBudget),
    ("budget type", F::CampaignBudgetType),
    ("tipo de orçamento", F::CampaignBudgetType),
    ("tipo de orçamento da campanha", F::CampaignBudgetType),
    ("result type", F::ConversionType),
    ("tipo de resultado", F::ConversionType),
    ("tipo de conversão", F::ConversionType),
];

static BUILTIN: LazyLock<HeaderAliases> = LazyLock::new(HeaderAliases::from_builtin);

#[derive(Debug, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// Immutable many-to-one mapping from normalized header to canonical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderAliases {
    map: BTreeMap<String, CanonicalField>,
}

impl HeaderAliases {
    /// The process-wide built-in table. Every canonical name maps to itself.
    pub fn builtin() -> &'static HeaderAliases {
        &BUILTIN
    }

    fn from_builtin() -> Self {
        let mut map = BTreeMap::new();
        for field in CANONICAL_SCHEMA {
            map.insert(field.as_str().to_string(), field);
            let spaced = field.as_str().replace('_', " ");
            map.insert(spaced, field);
        }
        for (header, field) in BUILTIN_ALIASES {
            map.insert(normalize_header(header), *field);
        }
        Self { map }
    }

    /// Returns a copy of this table with one more alias.
    ///
    /// Re-adding an existing alias for the same field is a no-op; pointing an
    /// existing alias at another field is an error.
    pub fn with_alias(
        mut self,
        header: &str,
        field: CanonicalField,
    ) -> Result<Self, MappingError> {
        let key = normalize_header(header);
        match self.map.get(&key) {
            Some(existing) if *existing != field => {
                return Err(MappingError::AliasConflict {
                    header: key,
                    existing: *existing,
                    requested: field,
                });
            }
            Some(_) => {}
            None => {
                self.map.insert(key, field);
            }
        }
        Ok(self)
    }

    /// Returns a copy of this table extended with the `[aliases]` table of a
    /// TOML document (`"header" = "canonical_field"`).
    pub fn extend_from_toml(&self, text: &str) -> Result<Self, MappingError> {
        let file: AliasFile = toml::from_str(text)?;
        let mut aliases = self.clone();
        for (header, target) in file.aliases {
            let field = target
                .parse::<CanonicalField>()
                .map_err(|_| MappingError::UnknownTarget {
                    header: header.clone(),
                    target: target.clone(),
                })?;
            debug!(header = %header, field = %field, "alias overlay entry");
            aliases = aliases.with_alias(&header, field)?;
        }
        Ok(aliases)
    }

    /// Reads a TOML overlay from disk and extends this table with it.
    pub fn extend_from_file(&self, path: &Path) -> Result<Self, MappingError> {
        let text = std::fs::read_to_string(path).map_err(|source| MappingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.extend_from_toml(&text)
    }

    /// Looks up a raw header, case- and whitespace-insensitively.
    pub fn lookup(&self, raw_header: &str) -> Option<CanonicalField> {
        self.map.get(&normalize_header(raw_header)).copied()
    }

    /// Canonical field names in schema order.
    pub fn canonical_names() -> impl Iterator<Item = &'static str> {
        CANONICAL_SCHEMA.iter().map(|field| field.as_str())
    }

    /// Iterates `(normalized header, field)` pairs in header order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, CanonicalField)> {
        self.map.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
