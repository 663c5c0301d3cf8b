//! # Configuration Tests
//!
//! Tests for the layered configuration loading. Environment variables are a
//! shared, global resource, so every test here runs under `#[serial]`.

use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;
use truthbuy::constants::{
    DEFAULT_AI_API_URL, DEFAULT_MAX_PRODUCT_CHARS, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use truthbuy_server::config::{get_config, ConfigError};

/// Clears every environment variable read by `get_config`.
fn clear_env_vars() {
    for var in [
        "PORT",
        "OPENROUTER_API_KEY",
        "MODEL_ID",
        "AI_API_URL",
        "REQUEST_TIMEOUT_SECS",
        "MAX_PRODUCT_CHARS",
        "ANALYSIS_TASK",
        "TRUTHBUY_MODEL_ID",
        "TRUTHBUY_TASKS__GIFT_CHECK__TEMPLATE",
        "TEST_CONFIG_API_KEY",
    ] {
        env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yml")
        .tempfile()
        .expect("temp config file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
#[serial]
fn test_get_config_defaults() {
    clear_env_vars();
    env::set_var("OPENROUTER_API_KEY", "sk-test");

    let config = get_config(None).expect("Configuration should load with only the key set");

    assert_eq!(config.openrouter_api_key, "sk-test");
    assert_eq!(config.port, 3000);
    assert_eq!(config.model_id, DEFAULT_MODEL);
    assert_eq!(config.ai_api_url, DEFAULT_AI_API_URL);
    assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(config.max_product_chars, DEFAULT_MAX_PRODUCT_CHARS);
    assert_eq!(config.analysis_task, "product_analysis");
    assert!(config.tasks.is_empty());

    clear_env_vars();
}

#[test]
#[serial]
fn test_get_config_success_all_vars() {
    clear_env_vars();
    env::set_var("OPENROUTER_API_KEY", "sk-test");
    env::set_var("PORT", "9999");
    env::set_var("MODEL_ID", "openai/gpt-4o-mini");
    env::set_var("AI_API_URL", "http://localhost:1234/v1/chat/completions");
    env::set_var("REQUEST_TIMEOUT_SECS", "15");
    env::set_var("MAX_PRODUCT_CHARS", "500");
    env::set_var("ANALYSIS_TASK", "quick_verdict");

    let config = get_config(None).expect("Configuration should load successfully");

    assert_eq!(config.port, 9999);
    assert_eq!(config.model_id, "openai/gpt-4o-mini");
    assert_eq!(config.ai_api_url, "http://localhost:1234/v1/chat/completions");
    assert_eq!(config.request_timeout_secs, 15);
    assert_eq!(config.max_product_chars, 500);
    assert_eq!(config.analysis_task, "quick_verdict");

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_api_key_is_a_startup_error() {
    clear_env_vars();

    let result = get_config(None);
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));

    env::set_var("OPENROUTER_API_KEY", "   ");
    let result = get_config(None);
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));

    clear_env_vars();
}

#[test]
#[serial]
fn test_empty_model_id_falls_back_to_default() {
    clear_env_vars();
    env::set_var("OPENROUTER_API_KEY", "sk-test");
    env::set_var("MODEL_ID", "");

    let config = get_config(None).expect("Configuration should load");
    assert_eq!(config.model_id, DEFAULT_MODEL);

    clear_env_vars();
}

#[test]
#[serial]
fn test_yaml_file_with_substitution_and_tasks() {
    clear_env_vars();
    env::set_var("TEST_CONFIG_API_KEY", "sk-from-file");
    let file = write_config(
        r#"
openrouter_api_key: "${TEST_CONFIG_API_KEY}"
model_id: "anthropic/claude-3-haiku"
port: 8088
tasks:
  gift_check:
    template: "Is this a good gift? {product_data}"
"#,
    );

    let config = get_config(file.path().to_str()).expect("Configuration should load from file");

    assert_eq!(config.openrouter_api_key, "sk-from-file");
    assert_eq!(config.model_id, "anthropic/claude-3-haiku");
    assert_eq!(config.port, 8088);
    assert_eq!(
        config.tasks["gift_check"].template,
        "Is this a good gift? {product_data}"
    );

    clear_env_vars();
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env_vars();
    env::set_var("OPENROUTER_API_KEY", "sk-env");
    env::set_var("TRUTHBUY_MODEL_ID", "override/model");
    let file = write_config(
        r#"
openrouter_api_key: "sk-file"
model_id: "file/model"
"#,
    );

    let config = get_config(file.path().to_str()).expect("Configuration should load");

    assert_eq!(config.openrouter_api_key, "sk-env");
    assert_eq!(config.model_id, "override/model");

    clear_env_vars();
}

#[test]
#[serial]
fn test_unset_substitution_counts_as_missing_key() {
    clear_env_vars();
    let file = write_config(r#"openrouter_api_key: "${TEST_CONFIG_API_KEY}""#);

    let result = get_config(file.path().to_str());
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));

    clear_env_vars();
}

#[test]
#[serial]
fn test_explicit_missing_file_is_not_found() {
    clear_env_vars();
    env::set_var("OPENROUTER_API_KEY", "sk-test");

    let result = get_config(Some("/definitely/not/here/config.yml"));
    match result {
        Err(ConfigError::NotFound(msg)) => assert!(msg.contains("/definitely/not/here/config.yml")),
        other => panic!("expected NotFound, got {other:?}"),
    }

    clear_env_vars();
}

#[test]
#[serial]
fn test_debug_output_redacts_api_key() {
    clear_env_vars();
    env::set_var("OPENROUTER_API_KEY", "sk-very-secret");

    let config = get_config(None).expect("Configuration should load");
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("sk-very-secret"));
    assert!(rendered.contains("<redacted>"));

    clear_env_vars();
}
