//! # Default Task Prompts
//!
//! The hardcoded prompt templates for the built-in analysis tasks. Each can be
//! overridden (or joined by new tasks) through the server's `config.yml`.

use crate::types::AnalysisTask;
use std::collections::HashMap;

pub const PRODUCT_ANALYSIS_TASK: &str = "product_analysis";
pub const QUICK_VERDICT_TASK: &str = "quick_verdict";

// --- Full Product Analysis ---
pub const PRODUCT_ANALYSIS_PROMPT: &str = r#"
Analyze this Amazon product. Return ONLY JSON.
{
  "reliability_score": number (0-10),
  "verdict": "BUY" | "CONSIDER" | "AVOID" | "CAUTION",
  "red_flags": [string],
  "pros": [string],
  "cons": [string],
  "suitability": { "best": [string], "not": [string] },
  "score_breakdown": { "Reliability": number, "Satisfaction": number, "Value": number },
  "competitors": [string],
  "summary": string,
  "detailed_analysis": string
}
DATA: {product_data}
"#;

// --- Quick Verdict ---
pub const QUICK_VERDICT_PROMPT: &str = r#"
Give a fast purchase verdict for this Amazon product. Return ONLY JSON.
{
  "reliability_score": number (0-10),
  "verdict": "BUY" | "CONSIDER" | "AVOID" | "CAUTION",
  "red_flags": [string],
  "summary": string
}
DATA: {product_data}
"#;

/// Returns the built-in tasks keyed by name.
pub fn builtin_tasks() -> HashMap<String, AnalysisTask> {
    [
        (PRODUCT_ANALYSIS_TASK, PRODUCT_ANALYSIS_PROMPT),
        (QUICK_VERDICT_TASK, QUICK_VERDICT_PROMPT),
    ]
    .into_iter()
    .map(|(name, template)| (name.to_string(), AnalysisTask::new(name, template)))
    .collect()
}
