//! Board Debug MCP Server
//!
//! Synthesizes debug server launch configuration (J-Link, OpenOCD, QEMU, Renode)
//! from declarative board manifests and exposes it over the Model Context Protocol.

pub mod catalog;
pub mod config;
pub mod error;
pub mod manifest;
pub mod packages;
pub mod platform;
pub mod resolver;
pub mod session;
pub mod tools;

pub use catalog::BoardCatalog;
pub use config::{Args, Config};
pub use error::{DebugConfigError, Result};
pub use manifest::{BoardManifest, DebugInfo, ServerDescriptor, ToolDescriptor};
pub use packages::{PackageDirLookup, PackageDirs};
pub use platform::HostPlatform;
pub use resolver::{resolve_debug_tools, DebugTool, OpenOcdAdapter};
pub use session::{apply_speed, configure_debug_session, DebugSession};
pub use tools::BoardDebugToolHandler;
