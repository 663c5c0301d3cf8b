use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// The product listing. `null` is treated the same as absent.
    #[serde(rename = "productData", default)]
    pub product_data: Option<Value>,
    /// Optional task name; the configured default is used otherwise.
    #[serde(default)]
    pub task: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: Value,
}
