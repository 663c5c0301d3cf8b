use super::{
    errors::AppError,
    state::AppState,
    types::{AnalyzeRequest, AnalyzeResponse},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

// --- Route Handlers ---

pub async fn root() -> &'static str {
    "TruthBuy Backend OK"
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Analyzes the `productData` of the request body and returns the model's verdict.
///
/// A body that is not a JSON object, or has no non-null `productData`, is rejected
/// before any outbound call. A request without a JSON content type is treated as
/// having no `productData`.
pub async fn analyze_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => return Err(AppError::MissingProductData),
        Err(rejection) => return Err(AppError::InvalidBody(rejection.body_text())),
    };
    if !payload.is_object() {
        return Err(AppError::MissingProductData);
    }

    let request: AnalyzeRequest =
        serde_json::from_value(payload).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    let product = request.product_data.ok_or(AppError::MissingProductData)?;

    info!(
        task = request.task.as_deref().unwrap_or(app_state.analyzer.default_task()),
        "Received analysis request."
    );
    let analysis = app_state
        .analyzer
        .analyze(&product, request.task.as_deref())
        .await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}
