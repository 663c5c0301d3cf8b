//! # Shared Constants
//!
//! Defaults shared by the library and the `truthbuy-server` crate. Keeping them in
//! one place means the server's configuration layer and the builder agree on what
//! "unset" means.

/// The OpenAI-compatible chat completion endpoint used when none is configured.
pub const DEFAULT_AI_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// The model identifier sent upstream when `MODEL_ID` is not set.
pub const DEFAULT_MODEL: &str = "x-ai/grok-4.1-fast:free";

/// Upper bound, in characters, on the serialized product data embedded in a prompt.
pub const DEFAULT_MAX_PRODUCT_CHARS: usize = 15_000;

/// The task used when a request does not name one.
pub const DEFAULT_TASK: &str = "product_analysis";

/// Timeout applied to the outbound completion call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// The placeholder replaced by the serialized product data in every task template.
pub const PRODUCT_DATA_PLACEHOLDER: &str = "{product_data}";
