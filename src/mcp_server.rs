use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::state::AppState;
use crate::tools::GenerateImageToolRequest;

#[derive(Clone)]
pub struct ImageGenerationServer {
    tool_router: ToolRouter<Self>,
    state: AppState,
}

impl ImageGenerationServer {
    pub fn new(state: AppState) -> Self {
        Self {
            tool_router: Self::tool_router(),
            state,
        }
    }
}

#[tool_router]
impl ImageGenerationServer {
    #[tool(
        description = "Generate an image from a text prompt. Returns JSON with the base64 image and, when saved on the server, its filename under /images."
    )]
    async fn generate_image(
        &self,
        Parameters(request): Parameters<GenerateImageToolRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::generate_image(&self.state, Parameters(request)).await
    }
}

#[tool_handler]
impl ServerHandler for ImageGenerationServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
