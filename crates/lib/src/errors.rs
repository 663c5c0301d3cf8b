use thiserror::Error;

/// Errors produced while turning product data into an analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("AI provider returned status {status}: {body}")]
    AiApi { status: u16, body: String },
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("Model response did not contain a JSON object")]
    MissingJsonObject { raw: String },
    #[error("Model response contained invalid JSON: {source}")]
    InvalidJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize product data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown analysis task: {0}")]
    UnknownTask(String),
    #[error("AI provider is missing")]
    MissingAiProvider,
}
