//! Field normalizer: one raw tabular row in, one clean record out.
//!
//! Every rule here is recoverable by omission. Unparsable numerics become
//! `None`, empty tokens vanish, and a row without a drug name yields no
//! record at all. Nothing in this module returns an error.

use crate::model::{LIST_DELIMITER, OTHER_NAMES_MARKER, SIDE_EFFECT_DELIMITER};
use crate::record::{NormalizedRecord, RawRecord};

/// Normalize one raw row. Returns `None` when the drug name is empty after
/// cleaning, which callers count as a skipped record.
pub fn normalize(raw: &RawRecord) -> Option<NormalizedRecord> {
    let drug_name = clean_field(&raw.drug_name);
    if drug_name.is_empty() {
        return None;
    }

    let condition_text = clean_field(&raw.medical_condition);
    let condition = Some(condition_name(&condition_text)).filter(|name| !name.is_empty());

    Some(NormalizedRecord {
        drug_name,
        generic_name: clean_field(&raw.generic_name),
        rx_otc: clean_field(&raw.rx_otc),
        rating: parse_rating(&raw.rating),
        reviews: parse_review_count(&raw.no_of_reviews),
        condition_text,
        condition,
        side_effects: split_tokens(&clean_field(&raw.side_effects), SIDE_EFFECT_DELIMITER),
        drug_classes: split_tokens(&clean_field(&raw.drug_classes), LIST_DELIMITER),
        brands: split_tokens(&clean_field(&raw.brand_names), LIST_DELIMITER),
    })
}

/// Strip stray double quotes and surrounding whitespace.
pub fn clean_field(value: &str) -> String {
    value.replace('"', "").trim().to_string()
}

/// Lowercase lookup key derived from a display name. Regenerable at any
/// time; never authoritative.
pub fn lookup_key(name: &str) -> String {
    name.to_lowercase()
}

/// Parse a rating field. Blank or non-numeric input (including NaN and
/// infinities) yields `None`.
pub fn parse_rating(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Parse a review-count field. Only plain integers are accepted; anything
/// else yields `None`.
pub fn parse_review_count(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Derive the condition display name from a cleaned description: truncate at
/// the alternate-names marker and drop a dangling opening parenthesis left
/// behind by it. Without the marker the trimmed description is used as-is.
pub fn condition_name(description: &str) -> String {
    match description.find(OTHER_NAMES_MARKER) {
        Some(idx) => description[..idx]
            .trim_end()
            .trim_end_matches('(')
            .trim()
            .to_string(),
        None => description.trim().to_string(),
    }
}

/// Split a multi-value field into trimmed, non-empty, deduplicated tokens,
/// preserving first-occurrence order.
pub fn split_tokens(value: &str, delimiter: char) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in value.split(delimiter) {
        let token = token.trim();
        if token.is_empty() || tokens.iter().any(|t| t == token) {
            continue;
        }
        tokens.push(token.to_string());
    }
    tokens
}
