pub mod openai;

use crate::errors::AnalysisError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a completion provider.
///
/// Implementations send a single user prompt and return the model's raw text. They
/// must not retry; one call to `generate` is at most one outbound request.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}

dyn_clone::clone_trait_object!(AiProvider);
