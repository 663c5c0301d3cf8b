//! # Delimited JSON Extraction
//!
//! Models asked to "return ONLY JSON" still wrap the object in prose or code fences
//! often enough that the output cannot be parsed directly. The extraction here is a
//! greedy span: everything from the first `{` to the last `}` inclusive. Two separate
//! objects in one answer are therefore read as a single (usually invalid) blob.

use crate::errors::AnalysisError;
use serde_json::Value;

/// Returns the span from the first `{` to the last `}` inclusive.
///
/// `None` when either delimiter is missing or the last `}` comes before the first `{`.
pub fn extract_delimited_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Extracts and parses the JSON object embedded in a model answer.
///
/// Both failure cases keep the raw text so callers can surface it for debugging.
pub fn parse_analysis(raw: &str) -> Result<Value, AnalysisError> {
    let span = extract_delimited_json(raw).ok_or_else(|| AnalysisError::MissingJsonObject {
        raw: raw.to_string(),
    })?;
    serde_json::from_str(span).map_err(|source| AnalysisError::InvalidJson {
        raw: raw.to_string(),
        source,
    })
}
