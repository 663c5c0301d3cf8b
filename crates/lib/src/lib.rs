//! # Product Analysis Relay
//!
//! This crate turns an arbitrary product listing into a structured verdict by asking
//! an OpenAI-compatible completion API to fill in a fixed JSON shape, then pulling
//! that JSON back out of the model's free-form answer.
//!
//! The pieces are deliberately small:
//! - [`prompts`] holds the named task templates and the prompt builder.
//! - [`providers::ai`] defines the [`AiProvider`](providers::ai::AiProvider) seam and
//!   the HTTP client behind it.
//! - [`extract`] locates and parses the JSON object inside the model output.
//! - [`ProductAnalyzer`] wires the three together for a single request.

pub mod constants;
pub mod errors;
pub mod extract;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::AnalysisError;
pub use types::{AnalysisTask, ProductAnalyzer, ProductAnalyzerBuilder};

use serde_json::Value;
use tracing::{debug, info};

impl ProductAnalyzer {
    /// Runs one analysis: build the prompt, call the provider once, parse the answer.
    ///
    /// `task` selects a template by name; `None` uses the analyzer's default task.
    /// Unknown task names are rejected before any outbound call is made.
    pub async fn analyze(&self, product: &Value, task: Option<&str>) -> Result<Value, AnalysisError> {
        let task_name = task.unwrap_or(self.default_task.as_str());
        let task = self
            .tasks
            .get(task_name)
            .ok_or_else(|| AnalysisError::UnknownTask(task_name.to_string()))?;

        let prompt = prompts::build_analysis_prompt(&task.template, product, self.max_product_chars)?;
        info!("[analyze] Running task '{}'.", task.name);
        debug!(prompt_chars = prompt.chars().count(), "[analyze] Prompt built.");

        let raw = self.ai_provider.generate(&prompt).await?;
        debug!(response_chars = raw.chars().count(), "[analyze] Received model output.");

        extract::parse_analysis(&raw)
    }

    /// Returns the names of all tasks this analyzer can run, sorted.
    pub fn task_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The task used when a request does not name one.
    pub fn default_task(&self) -> &str {
        &self.default_task
    }
}
