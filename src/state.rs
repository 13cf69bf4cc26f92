use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::openai::ProviderSettings;

/// Shared by the HTTP handlers and the MCP server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<ProviderSettings>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let provider = ProviderSettings::from(&config);
        Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
            http_client: Client::new(),
        }
    }
}
