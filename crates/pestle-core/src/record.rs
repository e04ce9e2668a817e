//! Raw and normalized record types.

use serde::Deserialize;

/// One row from the tabular source, untouched. Field names match the CSV
/// header columns; missing columns deserialize to empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub drug_name: String,
    pub generic_name: String,
    pub rx_otc: String,
    pub rating: String,
    pub no_of_reviews: String,
    pub medical_condition: String,
    pub side_effects: String,
    pub drug_classes: String,
    pub brand_names: String,
}

/// A cleaned record ready for graph upserts.
///
/// Multi-value fields are already split, trimmed, deduplicated, and free of
/// empty tokens. Numeric fields are `None` when the source was blank or
/// unparsable; the loader clears the stored property in that case rather
/// than writing a zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Display name of the drug, the node key. Never empty.
    pub drug_name: String,
    pub generic_name: String,
    /// Dispensing class, e.g. "Rx", "OTC", "Rx/OTC".
    pub rx_otc: String,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    /// Full cleaned condition description, stored on the drug node.
    pub condition_text: String,
    /// Condition display name with the alternate-names annotation stripped.
    /// `None` when the description was empty.
    pub condition: Option<String>,
    pub side_effects: Vec<String>,
    pub drug_classes: Vec<String>,
    pub brands: Vec<String>,
}
