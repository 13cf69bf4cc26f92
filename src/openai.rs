use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::Config;

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Option<Vec<ImageData>>,
    error: Option<OpenAiError>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl From<&Config> for ProviderSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.openai_base_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.image_model.clone(),
        }
    }
}

pub struct GenerateImageOptions {
    pub prompt: String,
    pub size: String,
}

async fn assert_ok_response(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ImagesResponse>(&text)
        .ok()
        .and_then(|payload| payload.error)
        .and_then(|err| err.message)
        .unwrap_or(text);
    Err(anyhow!("OpenAI request failed: {status} {message}"))
}

fn build_request_body(model: &str, options: &GenerateImageOptions) -> Value {
    json!({
        "model": model,
        "prompt": options.prompt,
        "n": 1,
        "size": options.size,
        "response_format": "b64_json",
    })
}

/// Requests one image and returns it as the provider's base64 string.
pub async fn generate_image_b64(
    client: &Client,
    settings: &ProviderSettings,
    options: &GenerateImageOptions,
) -> Result<String> {
    let body = build_request_body(&settings.model, options);
    tracing::debug!(model = %settings.model, size = %options.size, "requesting image generation");

    let response = client
        .post(format!("{}/images/generations", settings.base_url))
        .bearer_auth(&settings.api_key)
        .json(&body)
        .send()
        .await?;

    let response = assert_ok_response(response).await?;
    let payload: ImagesResponse = response.json().await?;
    if let Some(error) = payload.error.and_then(|err| err.message) {
        return Err(anyhow!("OpenAI returned an error: {error}"));
    }
    payload
        .data
        .and_then(|data| data.into_iter().next())
        .and_then(|image| image.b64_json)
        .filter(|b64| !b64.is_empty())
        .ok_or_else(|| anyhow!("OpenAI returned no image data"))
}
