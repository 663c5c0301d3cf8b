//! # Application Configuration
//!
//! This module defines the configuration structure for `truthbuy-server` and the
//! logic for loading it once at startup. Sources are layered, later ones winning:
//!
//! 1. Built-in defaults (serde defaults on [`AppConfig`]).
//! 2. An optional YAML file (`config.yml` in the working directory, or an explicit
//!    path) with `${VAR}` placeholders substituted from the environment.
//! 3. Plain environment variables such as `PORT`, `OPENROUTER_API_KEY`, `MODEL_ID`.
//! 4. Prefixed overrides, e.g. `TRUTHBUY_TASKS__QUICK_VERDICT__TEMPLATE`.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use tracing::info;
use truthbuy::constants::{
    DEFAULT_AI_API_URL, DEFAULT_MAX_PRODUCT_CHARS, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TASK,
};

/// The file picked up from the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
    /// The completion API credential is absent or empty.
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
            ConfigError::MissingApiKey => write!(
                f,
                "OPENROUTER_API_KEY is not set. The server cannot call the completion API without it."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bearer credential for the completion API. Loaded from `OPENROUTER_API_KEY`.
    #[serde(default)]
    pub openrouter_api_key: String,
    /// Model identifier sent upstream. Loaded from `MODEL_ID`.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Chat completion endpoint. Loaded from `AI_API_URL`.
    #[serde(default = "default_ai_api_url")]
    pub ai_api_url: String,
    /// Timeout for the outbound call, in seconds. Loaded from `REQUEST_TIMEOUT_SECS`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Character budget for the serialized product data. Loaded from `MAX_PRODUCT_CHARS`.
    #[serde(default = "default_max_product_chars")]
    pub max_product_chars: usize,
    /// Task used when a request does not name one. Loaded from `ANALYSIS_TASK`.
    #[serde(default = "default_analysis_task")]
    pub analysis_task: String,
    /// Template overrides and additional tasks, keyed by task name.
    #[serde(default)]
    pub tasks: HashMap<String, TaskConfig>,
}

/// A prompt template supplied through configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct TaskConfig {
    pub template: String,
}

fn default_port() -> u16 {
    3000
}

fn default_model_id() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_ai_api_url() -> String {
    DEFAULT_AI_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_product_chars() -> usize {
    DEFAULT_MAX_PRODUCT_CHARS
}

fn default_analysis_task() -> String {
    DEFAULT_TASK.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            openrouter_api_key: String::new(),
            model_id: default_model_id(),
            ai_api_url: default_ai_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_product_chars: default_max_product_chars(),
            analysis_task: default_analysis_task(),
            tasks: HashMap::new(),
        }
    }
}

// The credential never reaches the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("openrouter_api_key", &"<redacted>")
            .field("model_id", &self.model_id)
            .field("ai_api_url", &self.ai_api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_product_chars", &self.max_product_chars)
            .field("analysis_task", &self.analysis_task)
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .finish()
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from an optional file and the environment.
///
/// An explicit `config_path_override` must exist; the default `config.yml` is
/// optional. The returned config always carries a non-empty API key.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    // Layer 2: YAML file.
    let file_content = match config_path_override {
        Some(path) => Some(read_and_substitute(path)?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{path}'."))
        })?),
        None => read_and_substitute(DEFAULT_CONFIG_FILE)?,
    };
    if let Some(content) = file_content {
        info!(
            "Loading configuration file '{}'.",
            config_path_override.unwrap_or(DEFAULT_CONFIG_FILE)
        );
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        // Layer 3: plain environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: prefixed environment variables for nested overrides.
        .add_source(
            Environment::with_prefix("TRUTHBUY")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Empty values behave like unset ones, matching `${VAR}` substitution of missing vars.
    if config.model_id.trim().is_empty() {
        config.model_id = default_model_id();
    }
    if config.ai_api_url.trim().is_empty() {
        config.ai_api_url = default_ai_api_url();
    }
    if config.openrouter_api_key.trim().is_empty() {
        return Err(ConfigError::MissingApiKey);
    }

    Ok(config)
}
