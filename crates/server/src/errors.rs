use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use truthbuy::AnalysisError;

/// A custom error type for the server application.
///
/// Every variant converts into a JSON body, so callers never see an empty or
/// non-JSON error page.
#[derive(Debug)]
pub enum AppError {
    /// The request carried no `productData`, or it was `null`.
    MissingProductData,
    /// The request body could not be read as JSON.
    InvalidBody(String),
    /// Errors originating from the `truthbuy` library.
    Analysis(AnalysisError),
}

/// Conversion from `AnalysisError` to `AppError`.
impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Analysis(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::MissingProductData => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing productData" }),
            ),
            AppError::InvalidBody(details) => {
                error!("Invalid request body: {details}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid request body", "details": details }),
                )
            }
            AppError::Analysis(err) => {
                // Log the original error for debugging purposes
                error!("AnalysisError: {:?}", err);
                match err {
                    AnalysisError::UnknownTask(_) => {
                        (StatusCode::BAD_REQUEST, json!({ "error": err.to_string() }))
                    }
                    AnalysisError::AiApi { status, body } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Model API error", "status": status, "details": body }),
                    ),
                    AnalysisError::MissingJsonObject { raw } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Invalid JSON returned", "raw": raw }),
                    ),
                    AnalysisError::InvalidJson { raw, source } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({
                            "error": "Invalid JSON returned",
                            "raw": raw,
                            "details": source.to_string(),
                        }),
                    ),
                    other => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": other.to_string() }),
                    ),
                }
            }
        };

        (status_code, Json(body)).into_response()
    }
}
