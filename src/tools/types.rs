//! Type definitions for board debug MCP tools

use serde::Deserialize;
use schemars::JsonSchema;

// ============================================================================
// list_boards
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListBoardsArgs {
    /// Case-insensitive substring matched against board id, name and vendor
    #[serde(default)]
    pub filter: Option<String>,
}

// ============================================================================
// get_debug_tools
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetDebugToolsArgs {
    /// Board id (manifest file stem, e.g. "hifive1-revb")
    pub board: String,
}

// ============================================================================
// get_debug_server
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetDebugServerArgs {
    /// Board id (manifest file stem, e.g. "hifive1-revb")
    pub board: String,
    /// Debug tool name (e.g. "jlink", "ftdi", "qemu", "renode")
    pub tool: String,
    /// Adapter speed for this session (e.g. "4000"). Defaults to the board's debug.speed.
    #[serde(default)]
    pub speed: Option<String>,
}
