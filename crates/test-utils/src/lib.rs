use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use truthbuy::errors::AnalysisError;
use truthbuy::providers::ai::AiProvider;

// --- Mock AI Provider ---

/// A scripted provider that returns a fixed answer and records every prompt it sees.
///
/// Clones share the same call log, so a test can keep one handle while the
/// analyzer owns another.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    response: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a provider that always answers with `response`.
    pub fn with_response(response: &str) -> Self {
        let provider = Self::new();
        provider.set_response(response);
        provider
    }

    /// Replaces the programmed answer.
    pub fn set_response(&self, response: &str) {
        *self.response.lock().unwrap() = Some(response.to_string());
    }

    /// Retrieves the recorded prompts for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AnalysisError::AiApi {
                status: 500,
                body: "MockAiProvider: no response programmed".to_string(),
            })
    }
}
