//! Error types for the board-debug MCP server

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for debug configuration synthesis
#[derive(Error, Debug)]
pub enum DebugConfigError {
    /// A board manifest lacks an identifier a tool cannot be launched without.
    #[error("Board {board}: missing {attribute}")]
    MissingAttribute {
        board: String,
        attribute: &'static str,
    },

    #[error("Board {board}: unknown debug configuration for {tool}")]
    UnknownDebugConfiguration { board: String, tool: String },

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Board {board}: debug tool {tool} is not available")]
    ToolNotAvailable { board: String, tool: String },

    #[error("Invalid manifest {}: {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DebugConfigError {
    /// Board the error refers to, if any.
    pub fn board(&self) -> Option<&str> {
        match self {
            Self::MissingAttribute { board, .. }
            | Self::UnknownDebugConfiguration { board, .. }
            | Self::ToolNotAvailable { board, .. } => Some(board),
            Self::BoardNotFound(board) => Some(board),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DebugConfigError>;
