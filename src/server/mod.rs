//! HTTP shell around the reviewer.
//!
//! `GET /api/health` and `POST /api/review`, with the API key check on the
//! review route and permissive CORS on everything.

pub mod auth;

use crate::config::AppConfig;
use crate::core::types::{ReviewRequest, ReviewResult};
use crate::errors::{ReviewError, ServerError};
use crate::review_engine::{Reviewer, check_declared_language};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Immutable state shared by all requests.
pub struct AppState {
    pub config: AppConfig,
    pub reviewer: Reviewer,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let reviewer = Reviewer::with_latency(config.review.simulated_latency);
        Self { config, reviewer }
    }
}

pub type SharedState = Arc<AppState>;

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review: ReviewResult,
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        match self {
            ReviewError::EmptyCode => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Code is required" })),
            )
                .into_response(),
            ReviewError::LanguageMismatch { detected, selected } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!(
                        "Language mismatch: the code appears to be {} but {} was selected",
                        detected, selected
                    ),
                    "detectedLanguage": detected,
                    "selectedLanguage": selected,
                })),
            )
                .into_response(),
            ReviewError::UnsupportedLanguage(name) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Unsupported language: {}", name) })),
            )
                .into_response(),
            ReviewError::Internal(reason) => {
                tracing::error!("Error processing code review: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to process code review" })),
                )
                    .into_response()
            }
        }
    }
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}

/// Pull the code text out of a request body.
///
/// Falsy JSON values (missing, null, "", 0, false) count as no code; any
/// other non-string is rejected as an internal failure.
fn request_code(code: Option<&Value>) -> Result<&str, ReviewError> {
    match code {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(ReviewError::EmptyCode),
        Some(Value::String(text)) if text.is_empty() => Err(ReviewError::EmptyCode),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(ReviewError::EmptyCode),
        Some(other) => Err(ReviewError::Internal(format!(
            "code must be a string, got {}",
            other
        ))),
    }
}

async fn review_code(
    State(state): State<SharedState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Response, ReviewError> {
    let code = request_code(request.code.as_ref())?;
    check_declared_language(
        code,
        request.language.as_deref(),
        state.config.review.enforce_language,
    )?;

    let review = state.reviewer.review(code).await?;
    Ok(Json(ReviewResponse { review }).into_response())
}

/// Build the API router.
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let review_routes = Router::new()
        .route("/api/review", post(review_code))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::validate_api_key,
        ));

    Router::new()
        .route("/api/health", get(health_check))
        .merge(review_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start_server(config: AppConfig) -> Result<(), ServerError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    if config.server.is_production() && config.server.api_key.is_none() {
        tracing::warn!("Production mode without an API key: every review request will be rejected");
    }

    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
