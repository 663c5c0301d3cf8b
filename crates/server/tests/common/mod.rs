//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `truthbuy-server`
//! integration tests.
//!
//! - `TestApp`: spawns the real router on a random port, with the completion API
//!   replaced by an `httpmock::MockServer`.
//! - Helpers for building chat completion envelopes.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use reqwest::Client;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};
use truthbuy_server::{
    config::AppConfig,
    router,
    state::{build_app_state, AppState},
};

pub const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";
pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "test/mock-model";

/// Wraps `content` in an OpenAI-style chat completion response.
pub fn completion_envelope(content: &str) -> Value {
    json!({
        "id": "gen-test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content }
        }]
    })
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with the default configuration pointed at a fresh mock server.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|config| config).await
    }

    /// Spawns the server after letting the caller adjust the configuration.
    pub async fn spawn_with(customize: impl FnOnce(AppConfig) -> AppConfig) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let config = customize(AppConfig {
            port: 0,
            openrouter_api_key: TEST_API_KEY.to_string(),
            model_id: TEST_MODEL.to_string(),
            ai_api_url: mock_server.url(COMPLETIONS_PATH),
            request_timeout_secs: 5,
            ..Default::default()
        });
        let app_state = build_app_state(&config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Posts `body` as JSON to `/analyze`.
    pub async fn post_analyze(&self, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/analyze", self.address))
            .json(body)
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked,
            // so we ignore the result of send.
            let _ = tx.send(());
        }
    }
}
