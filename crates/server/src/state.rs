//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Everything in it is immutable after startup, so
//! handlers share it through cheap `Arc` clones.

use crate::config::AppConfig;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};
use truthbuy::{
    constants::PRODUCT_DATA_PLACEHOLDER, providers::ai::openai::OpenAiCompatibleProvider,
    AnalysisTask, ProductAnalyzer, ProductAnalyzerBuilder,
};

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The analyzer wired to the configured completion API.
    pub analyzer: Arc<ProductAnalyzer>,
}

/// Builds the shared application state from the configuration.
///
/// Instantiates the completion API client and registers any task templates
/// from the configuration on top of the built-in ones.
pub async fn build_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let provider = OpenAiCompatibleProvider::new(
        config.ai_api_url.clone(),
        config.openrouter_api_key.clone(),
        config.model_id.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    info!(
        api_url = %config.ai_api_url,
        model = %provider.model(),
        "Initialized completion API provider."
    );

    let mut builder = ProductAnalyzerBuilder::new()
        .ai_provider(Box::new(provider))
        .default_task(config.analysis_task.clone())
        .max_product_chars(config.max_product_chars);

    for (name, task_config) in &config.tasks {
        if !task_config.template.contains(PRODUCT_DATA_PLACEHOLDER) {
            warn!("Task '{name}' has no {PRODUCT_DATA_PLACEHOLDER} placeholder; the product will not be sent.");
        }
        builder = builder.task(AnalysisTask::new(name, task_config.template.clone()));
    }

    let analyzer = builder.build()?;
    info!(tasks = ?analyzer.task_names(), default_task = %analyzer.default_task(), "Analyzer ready.");

    Ok(AppState {
        analyzer: Arc::new(analyzer),
    })
}
