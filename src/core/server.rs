//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! The tool catalog lives in `domains/tools/definitions/catalog.rs` and the
//! ToolRouter is built from it in `domains/tools/router.rs`. Both the rmcp
//! handler below and the HTTP JSON-RPC endpoint go through the same
//! [`ToolRegistry`], which owns the session's [`RenshuuClient`].

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::renshuu::RenshuuClient;
use crate::domains::tools::{
    RenshuuTool, ToolError, ToolRegistry, build_tool_router, unknown_tool_result,
};

const INSTRUCTIONS: &str = "Renshuu vocabulary tools. Use add_word_by_schedule_name or \
add_word_by_list_name to add a word by container name; the other tools map one-to-one \
onto the Renshuu API.";

/// The main MCP server handler.
///
/// Cloning is cheap; every clone shares the same client session.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Session client, shared with the REST proxy.
    client: RenshuuClient,

    /// Tool dispatch shared by every transport.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server around an already-built client session.
    pub fn new(config: Config, client: RenshuuClient) -> Self {
        let registry = Arc::new(ToolRegistry::new(client.clone()));

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            client,
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The session client.
    pub fn client(&self) -> &RenshuuClient {
        &self.client
    }

    /// Instructions advertised to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> serde_json::Value {
        self.registry.call_tool_json(name, arguments).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    /// Unknown names are answered with an error payload rather than a
    /// protocol error so the channel stays usable.
    #[instrument(skip(self, request, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if RenshuuTool::from_name(&request.name).is_none() {
            return Ok(unknown_tool_result(ToolError::not_found(
                request.name.as_ref(),
            )));
        }

        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }
}
