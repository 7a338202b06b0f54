//! Configuration options for normalization.

use serde::{Deserialize, Serialize};

/// How decimal and thousands separators are disambiguated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberLocale {
    /// `.` groups thousands, `,` is the decimal mark. `"1.234,56"` is 1234.56
    /// and `"12,5"` is 12.5. US-style `"1,234.56"` is misread as 1.23456.
    #[default]
    Brazilian,
    /// `,` groups thousands, `.` is the decimal mark.
    English,
    /// When both marks appear, the right-most one is the decimal mark. A lone
    /// `,` followed by exactly three digits is read as a thousands separator.
    Auto,
}

/// What happens when two source headers resolve to the same canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later column replaces the earlier one; a diagnostic is emitted.
    #[default]
    LastWins,
    /// Collisions are a hard mapping error.
    Reject,
}

/// Default Jaro-Winkler similarity for "did you mean" header hints.
pub const DEFAULT_SUGGEST_THRESHOLD: f64 = 0.92;

/// Options controlling table normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    pub number_locale: NumberLocale,
    pub collision_policy: CollisionPolicy,
    /// Minimum similarity for suggesting a known header for an unmapped one.
    pub suggest_threshold: f64,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            number_locale: NumberLocale::default(),
            collision_policy: CollisionPolicy::default(),
            suggest_threshold: DEFAULT_SUGGEST_THRESHOLD,
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number_locale(mut self, locale: NumberLocale) -> Self {
        self.number_locale = locale;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn with_suggest_threshold(mut self, threshold: f64) -> Self {
        self.suggest_threshold = threshold;
        self
    }
}
