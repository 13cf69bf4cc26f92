use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tower_http::services::ServeDir;

use crate::{
    auth::{API_KEY_HEADER, verify_api_key},
    error::ServiceError,
    state::AppState,
    tools::{self, GenerateImageRequest},
};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse { error: message.to_string() })).into_response()
}

fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Unauthorized => StatusCode::FORBIDDEN,
        ServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        ServiceError::Persist(persist) if persist.is_client_error() => StatusCode::BAD_REQUEST,
        ServiceError::Persist(_) | ServiceError::Provider(_) | ServiceError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "image generation request failed");
        }
        json_error(status, &self.to_string())
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn generate_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Response {
    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if !verify_api_key(state.config.api_secret_key.as_deref(), provided) {
        tracing::warn!("rejected /generate request with invalid API key");
        return ServiceError::Unauthorized.into_response();
    }
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                &format!("Invalid JSON body: {}", rejection.body_text()),
            );
        }
    };
    match tools::generate_image::run(&state, request).await {
        Ok(generated) => (StatusCode::OK, Json(generated)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `POST /generate`, `GET /health` and the saved images under `/images`.
pub fn router(state: AppState) -> Router {
    let images_dir = state.config.images_dir.clone();
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate_image))
        .nest_service("/images", ServeDir::new(images_dir))
        .with_state(state)
}
