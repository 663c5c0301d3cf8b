use crate::{
    constants::{DEFAULT_MAX_PRODUCT_CHARS, DEFAULT_TASK},
    errors::AnalysisError,
    prompts::tasks::builtin_tasks,
    providers::ai::AiProvider,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A named prompt template.
///
/// The template must contain the `{product_data}` placeholder; it is replaced by the
/// (truncated) JSON serialization of the product at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTask {
    pub name: String,
    pub template: String,
}

impl AnalysisTask {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// Runs product analyses against a single AI provider.
///
/// The analyzer holds no per-request state and can be shared freely behind an `Arc`.
pub struct ProductAnalyzer {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) tasks: HashMap<String, AnalysisTask>,
    pub(crate) default_task: String,
    pub(crate) max_product_chars: usize,
}

impl fmt::Debug for ProductAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductAnalyzer")
            .field("ai_provider", &self.ai_provider)
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .field("default_task", &self.default_task)
            .field("max_product_chars", &self.max_product_chars)
            .finish()
    }
}

/// A builder for creating `ProductAnalyzer` instances.
///
/// The built-in tasks are always registered first; [`task`](Self::task) replaces a
/// built-in of the same name or adds a new one.
pub struct ProductAnalyzerBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    tasks: HashMap<String, AnalysisTask>,
    default_task: String,
    max_product_chars: usize,
}

impl Default for ProductAnalyzerBuilder {
    fn default() -> Self {
        Self {
            ai_provider: None,
            tasks: builtin_tasks(),
            default_task: DEFAULT_TASK.to_string(),
            max_product_chars: DEFAULT_MAX_PRODUCT_CHARS,
        }
    }
}

impl ProductAnalyzerBuilder {
    /// Creates a new `ProductAnalyzerBuilder` with the built-in tasks registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use truthbuy::ProductAnalyzerBuilder;
    ///
    /// let builder = ProductAnalyzerBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider used for completions.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Registers a task, replacing any existing task with the same name.
    pub fn task(mut self, task: AnalysisTask) -> Self {
        self.tasks.insert(task.name.clone(), task);
        self
    }

    /// Sets the task used when a request does not name one.
    pub fn default_task(mut self, name: impl Into<String>) -> Self {
        self.default_task = name.into();
        self
    }

    /// Sets the maximum number of characters of serialized product data kept in a prompt.
    pub fn max_product_chars(mut self, max_product_chars: usize) -> Self {
        self.max_product_chars = max_product_chars;
        self
    }

    /// Builds the `ProductAnalyzer`.
    ///
    /// Fails if no provider was set or if the default task is not registered.
    pub fn build(self) -> Result<ProductAnalyzer, AnalysisError> {
        let ai_provider = self.ai_provider.ok_or(AnalysisError::MissingAiProvider)?;
        if !self.tasks.contains_key(&self.default_task) {
            return Err(AnalysisError::UnknownTask(self.default_task));
        }
        Ok(ProductAnalyzer {
            ai_provider,
            tasks: self.tasks,
            default_task: self.default_task,
            max_product_chars: self.max_product_chars,
        })
    }
}
