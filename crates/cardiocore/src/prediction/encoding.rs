//! Shared category-to-index tables for the clinical enums.
//!
//! The zero-based position of each label is a versioned contract with the
//! scoring model: the same label must always encode to the same index, and
//! the order must never be silently changed between releases. Every call
//! site (single assessments and batch scoring alike) goes through this one
//! table rather than carrying its own copy.

use super::normalizer::ValidationError;

pub(crate) struct CategoryTable {
    pub(crate) field: &'static str,
    pub(crate) labels: &'static [&'static str],
}

impl CategoryTable {
    /// Encode a label to its fixed index. Matching is case-insensitive on
    /// trimmed input; the stored labels are the canonical lowercase forms.
    pub(crate) fn encode(&self, raw: &str) -> Result<f64, ValidationError> {
        let needle = raw.trim().to_ascii_lowercase();
        self.labels
            .iter()
            .position(|label| *label == needle)
            .map(|index| index as f64)
            .ok_or_else(|| ValidationError {
                field: self.field,
                reason: format!(
                    "unknown value '{}', expected one of: {}",
                    raw.trim(),
                    self.labels.join(", ")
                ),
            })
    }
}

pub(crate) const SEX: CategoryTable = CategoryTable {
    field: "sex",
    labels: &["female", "male"],
};

pub(crate) const CHEST_PAIN_TYPE: CategoryTable = CategoryTable {
    field: "chestPainType",
    labels: &[
        "typical angina",
        "atypical angina",
        "non-anginal pain",
        "asymptomatic",
    ],
};

pub(crate) const RESTING_ECG: CategoryTable = CategoryTable {
    field: "restingECG",
    labels: &[
        "normal",
        "st-t wave abnormality",
        "left ventricular hypertrophy",
    ],
};

pub(crate) const ST_SLOPE: CategoryTable = CategoryTable {
    field: "stSlope",
    labels: &["up", "flat", "down"],
};
