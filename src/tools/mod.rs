//! Board debug MCP tools module
//!
//! Exposes board manifests and their resolved debug tool launch
//! configuration using the RMCP 0.3.2 API patterns.

pub mod debug_tools;
pub mod types;

pub use debug_tools::*;
pub use types::*;
