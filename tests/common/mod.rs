//! Shared setup for the integration tests: a mocked image provider and a
//! matching [`Config`].

#![allow(dead_code)]

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image_gen_rmcp::config::Config;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

pub const SECRET: &str = "test-secret";

pub fn png_bytes() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&[0u8; 92]);
    bytes
}

pub fn png_b64() -> String {
    STANDARD.encode(png_bytes())
}

pub fn test_config(provider: &MockServer, images_dir: &Path) -> Config {
    Config {
        port: 0,
        openai_api_key: "sk-test".to_string(),
        openai_base_url: format!("{}/v1", provider.uri()),
        image_model: "dall-e-3".to_string(),
        default_size: "1024x1024".to_string(),
        api_secret_key: Some(SECRET.to_string()),
        images_dir: images_dir.to_path_buf(),
        save_images: true,
    }
}

/// Provider that answers every generation request with `image`.
pub async fn mock_provider(image: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "n": 1, "response_format": "b64_json" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1_700_000_000,
            "data": [{ "b64_json": image }]
        })))
        .mount(&server)
        .await;
    server
}

/// Provider that rejects every request the way the safety filter does.
pub async fn failing_provider() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "Your request was rejected by the safety system." }
        })))
        .mount(&server)
        .await;
    server
}
