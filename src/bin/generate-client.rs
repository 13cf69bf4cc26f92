use std::env;

use anyhow::{Context, Result};
use serde_json::{Value, json};

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/generate";
const DEFAULT_PROMPT: &str = "A futuristic city skyline at sunset";
const PREVIEW_CHARS: usize = 100;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let api_url = env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let api_key = env::var("API_SECRET_KEY").unwrap_or_default();
    let args: Vec<String> = env::args().skip(1).collect();
    let prompt = if args.is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        args.join(" ")
    };
    let size = env::var("IMAGE_SIZE").unwrap_or_else(|_| "1024x1024".to_string());

    let response = reqwest::Client::new()
        .post(&api_url)
        .header("X-API-KEY", api_key)
        .json(&json!({ "prompt": prompt, "size": size }))
        .send()
        .await
        .with_context(|| format!("request to {api_url} failed"))?;

    let status = response.status();
    let body: Value = response.json().await.context("response was not JSON")?;
    println!("Status Code: {status}");
    match body.get("image").and_then(Value::as_str) {
        Some(image) => {
            let preview: String = image.chars().take(PREVIEW_CHARS).collect();
            println!("Image Generated Successfully!");
            println!("Base64 Image Data: {preview}...");
            if let Some(filename) = body.get("filename").and_then(Value::as_str) {
                println!("Saved as: {filename}");
            }
        }
        None => println!("Response: {body}"),
    }
    Ok(())
}
