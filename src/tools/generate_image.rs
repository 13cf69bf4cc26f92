use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars::JsonSchema,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::verify_api_key,
    error::{PersistError, ServiceError},
    openai::{self, GenerateImageOptions},
    state::AppState,
    storage::persist_base64_image,
};

#[derive(Debug, Default, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateImageToolRequest {
    #[schemars(description = "Text description of the image to generate")]
    pub prompt: String,
    #[schemars(description = "Image size as WIDTHxHEIGHT, e.g. 1024x1024")]
    pub size: Option<String>,
    #[schemars(description = "Shared API secret of this service")]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedImage {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

fn validate_size(size: &str) -> Result<(), ServiceError> {
    let valid = size
        .split_once('x')
        .map(|(w, h)| {
            [w, h]
                .iter()
                .all(|dim| dim.parse::<u32>().map(|value| value > 0).unwrap_or(false))
        })
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ServiceError::InvalidArgument(format!(
            "size must look like 1024x1024, got {size:?}"
        )))
    }
}

/// Validates the request, asks the provider for an image and, when enabled,
/// saves it. A filesystem write failure only drops the filename from the
/// result; every other save failure fails the request.
pub async fn run(state: &AppState, request: GenerateImageRequest) -> Result<GeneratedImage, ServiceError> {
    let prompt = request
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|prompt| !prompt.is_empty())
        .ok_or_else(|| ServiceError::InvalidArgument("Prompt is required".to_string()))?
        .to_string();
    let size = request
        .size
        .as_deref()
        .map(str::trim)
        .filter(|size| !size.is_empty())
        .unwrap_or(state.config.default_size.as_str())
        .to_string();
    validate_size(&size)?;

    let image = openai::generate_image_b64(
        &state.http_client,
        &state.provider,
        &GenerateImageOptions { prompt, size },
    )
    .await
    .map_err(ServiceError::Provider)?;

    if !state.config.save_images {
        return Ok(GeneratedImage { image, filename: None });
    }

    let images_dir = state.config.images_dir.clone();
    let payload = image.clone();
    let saved = tokio::task::spawn_blocking(move || persist_base64_image(&payload, images_dir)).await;
    let filename = match saved {
        Ok(Ok(filename)) => {
            tracing::info!(%filename, "generated image saved");
            Some(filename)
        }
        Ok(Err(err @ PersistError::Write { .. })) => {
            tracing::warn!(error = %err, "could not save generated image, returning it unsaved");
            None
        }
        Ok(Err(err)) => return Err(err.into()),
        Err(err) => return Err(ServiceError::Internal(format!("image save task failed: {err}"))),
    };
    Ok(GeneratedImage { image, filename })
}

fn to_mcp_error(err: ServiceError) -> McpError {
    match err {
        ServiceError::Unauthorized => McpError::invalid_request(err.to_string(), None),
        ServiceError::InvalidArgument(message) => McpError::invalid_params(message, None),
        ServiceError::Persist(ref persist) if persist.is_client_error() => McpError::invalid_params(
            "provider returned unusable image data",
            Some(serde_json::Value::String(err.to_string())),
        ),
        other => McpError::internal_error(
            "generate image failed",
            Some(serde_json::Value::String(other.to_string())),
        ),
    }
}

pub async fn generate_image(
    state: &AppState,
    Parameters(request): Parameters<GenerateImageToolRequest>,
) -> Result<CallToolResult, McpError> {
    if !verify_api_key(state.config.api_secret_key.as_deref(), request.api_key.as_deref()) {
        tracing::warn!("rejected generate_image tool call with invalid API key");
        return Err(to_mcp_error(ServiceError::Unauthorized));
    }
    let result = run(
        state,
        GenerateImageRequest {
            prompt: Some(request.prompt),
            size: request.size,
        },
    )
    .await
    .map_err(to_mcp_error)?;
    let json = serde_json::to_string(&result).map_err(|err| {
        McpError::internal_error(
            "serialize tool response failed",
            Some(serde_json::Value::String(err.to_string())),
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
