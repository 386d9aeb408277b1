use super::SharedState;
use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Require a matching `x-api-key` header in production.
///
/// Outside production every request passes. A production server with no
/// key configured rejects every key it is given.
pub async fn validate_api_key(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.server.is_production() {
        tracing::debug!("API key validation bypassed in {} mode", state.config.server.environment);
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        None => {
            tracing::warn!("Rejected request without API key");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "API key is required" })),
            )
                .into_response()
        }
        Some(key) if state.config.server.api_key.as_deref() == Some(key) => {
            next.run(request).await
        }
        Some(_) => {
            tracing::warn!("Rejected request with invalid API key");
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Invalid API key" })),
            )
                .into_response()
        }
    }
}
