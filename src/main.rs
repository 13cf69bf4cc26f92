use anyhow::Result;

use image_gen_rmcp::{
    config::Config,
    http_api,
    mcp_server::ImageGenerationServer,
    state::AppState,
};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};

const MCP_PATH: &str = "/mcp";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_gen_rmcp=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.api_secret_key.is_none() {
        tracing::warn!("API_SECRET_KEY is not set, requests are not authenticated");
    }
    let bind_address = config.bind_address();
    let state = AppState::new(config);

    let state_for_service = state.clone();
    let service = StreamableHttpService::new(
        move || Ok(ImageGenerationServer::new(state_for_service.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = http_api::router(state.clone()).nest_service(MCP_PATH, service);
    let tcp_listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!(
        images_dir = %state.config.images_dir.display(),
        save_images = state.config.save_images,
        "image generation server listening on http://{bind_address} (HTTP /generate, MCP {MCP_PATH})"
    );

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
