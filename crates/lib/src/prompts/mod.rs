//! # Prompt Construction
//!
//! Task templates live in [`tasks`]. This module fills a template with the
//! serialized product data.

pub mod tasks;

use crate::{constants::PRODUCT_DATA_PLACEHOLDER, errors::AnalysisError};
use serde_json::Value;

/// Returns the longest prefix of `text` that holds at most `max_chars` characters.
///
/// Counting is done in `char`s so the cut never lands inside a multi-byte sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Serializes `product` to compact JSON, truncates it to `max_chars` characters and
/// substitutes it for `{product_data}` in `template`.
///
/// The truncated serialization is usually no longer valid JSON; it only needs to be
/// readable by the model.
pub fn build_analysis_prompt(
    template: &str,
    product: &Value,
    max_chars: usize,
) -> Result<String, AnalysisError> {
    let serialized = serde_json::to_string(product)?;
    let data = truncate_chars(&serialized, max_chars);
    Ok(template.replace(PRODUCT_DATA_PLACEHOLDER, data))
}
