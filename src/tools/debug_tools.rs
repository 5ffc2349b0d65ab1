//! RMCP 0.3.2 implementation for board debug MCP tools
//!
//! Provides 3 tools: board listing, resolved debug tools per board, and the
//! per-session debug server launch configuration.

use rmcp::{
    tool, tool_router, tool_handler, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    ErrorData as McpError,
};
use tracing::info;
use std::future::Future;
use std::sync::Arc;

use super::types::*;
use crate::catalog::BoardCatalog;
use crate::config::Config;
use crate::error::DebugConfigError;
use crate::packages::PackageDirs;
use crate::session::configure_debug_session;

/// Board debug tool handler
#[derive(Clone)]
pub struct BoardDebugToolHandler {
    #[allow(dead_code)]
    tool_router: ToolRouter<BoardDebugToolHandler>,
    config: Config,
    packages: PackageDirs,
    catalog: Arc<BoardCatalog>,
}

impl BoardDebugToolHandler {
    /// Create a handler, loading board manifests from the configured directory.
    pub fn new(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let catalog = BoardCatalog::load(&config.boards_dir)?;
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: Config, catalog: BoardCatalog) -> Self {
        Self {
            tool_router: Self::tool_router(),
            packages: config.package_dirs(),
            config,
            catalog: Arc::new(catalog),
        }
    }
}

impl Default for BoardDebugToolHandler {
    fn default() -> Self {
        Self::with_catalog(Config::default(), BoardCatalog::default())
    }
}

fn to_mcp_error(error: DebugConfigError) -> McpError {
    match error {
        DebugConfigError::BoardNotFound(_) | DebugConfigError::ToolNotAvailable { .. } => {
            McpError::invalid_params(error.to_string(), None)
        }
        other => McpError::internal_error(other.to_string(), None),
    }
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(format!("JSON error: {}", e), None))?,
    )]))
}

#[tool_router]
impl BoardDebugToolHandler {
    #[tool(description = "List known boards with their upload protocols and resolved debug tools. Optional filter matches id, name or vendor.")]
    async fn list_boards(&self, Parameters(args): Parameters<ListBoardsArgs>) -> Result<CallToolResult, McpError> {
        let filter = args.filter.map(|f| f.to_lowercase());

        let mut boards = Vec::new();
        for id in self.catalog.ids() {
            let Some(manifest) = self.catalog.get(id) else { continue };
            if let Some(filter) = &filter {
                let haystack = format!("{} {} {}", id, manifest.name, manifest.vendor).to_lowercase();
                if !haystack.contains(filter.as_str()) {
                    continue;
                }
            }

            let mut entry = serde_json::json!({
                "id": id,
                "name": manifest.name,
                "vendor": manifest.vendor,
                "upload_protocols": manifest.upload.protocols,
            });
            match self.catalog.board(id, self.config.host, &self.packages) {
                Ok(board) => {
                    let tools: Vec<&String> = board.debug.tools.keys().collect();
                    entry["debug_tools"] = serde_json::json!(tools);
                }
                Err(e) => {
                    entry["error"] = serde_json::json!(e.to_string());
                }
            }
            boards.push(entry);
        }

        json_result(&serde_json::json!({
            "count": boards.len(),
            "boards": boards,
        }))
    }

    #[tool(description = "Get the resolved debug tools (server package, executable, arguments, onboard flag) for a board")]
    async fn get_debug_tools(&self, Parameters(args): Parameters<GetDebugToolsArgs>) -> Result<CallToolResult, McpError> {
        let board = self
            .catalog
            .board(&args.board, self.config.host, &self.packages)
            .map_err(to_mcp_error)?;

        info!("Resolved {} debug tools for {}", board.debug.tools.len(), board.id);
        json_result(&serde_json::json!({
            "board": board.id,
            "tools": board.debug.tools,
        }))
    }

    #[tool(description = "Get the debug server launch configuration for one board/tool pair, with optional adapter speed for this session")]
    async fn get_debug_server(&self, Parameters(args): Parameters<GetDebugServerArgs>) -> Result<CallToolResult, McpError> {
        let board = self
            .catalog
            .board(&args.board, self.config.host, &self.packages)
            .map_err(to_mcp_error)?;

        let session = configure_debug_session(&board, &args.tool, args.speed.as_deref())
            .map_err(to_mcp_error)?;

        info!("Debug server for {}/{}: {}", session.board, session.tool, session.server().executable);
        let mut value = serde_json::to_value(&session)
            .map_err(|e| McpError::internal_error(format!("JSON error: {}", e), None))?;
        value["command_line"] = serde_json::json!(session.server().command_line());
        json_result(&value)
    }
}

#[tool_handler]
impl ServerHandler for BoardDebugToolHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Board Debug MCP - Debug server launch configuration for embedded boards. \
                 3 tools: list_boards, get_debug_tools, get_debug_server."
                    .to_string(),
            ),
        }
    }
}
