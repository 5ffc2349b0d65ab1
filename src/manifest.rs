//! Board manifest model
//!
//! Mirrors the JSON board manifest layout (`build`, `upload`, `debug`, ...).
//! Fields this crate does not interpret are kept in `extra` maps so a manifest
//! survives a load/serialize cycle untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{DebugConfigError, Result};

/// A declarative descriptor for one supported board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardManifest {
    /// Stable identifier, taken from the manifest file stem
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub debug: DebugInfo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// ABI string, e.g. "ilp32" or "lp64"
    #[serde(default)]
    pub mabi: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jlink_device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qemu_machine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renode_machine: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub onboard_tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_cmds: Option<String>,
    /// Default adapter speed, applied per session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    /// Resolved tools, kept in manifest order then catalog order
    #[serde(default)]
    pub tools: IndexMap<String, ToolDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DebugInfo {
    pub fn jlink_device(&self) -> Option<&str> {
        non_empty(&self.jlink_device)
    }

    pub fn qemu_machine(&self) -> Option<&str> {
        non_empty(&self.qemu_machine)
    }

    pub fn renode_machine(&self) -> Option<&str> {
        non_empty(&self.renode_machine)
    }

    pub fn is_onboard(&self, tool: &str) -> bool {
        self.onboard_tools.iter().any(|t| t == tool)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A resolved debug tool: how to launch its GDB server and what it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    #[serde(default, skip_serializing_if = "ServerDescriptor::is_empty")]
    pub server: ServerDescriptor,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub onboard: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_cmds: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolDescriptor {
    pub fn new(server: ServerDescriptor) -> Self {
        Self {
            server,
            onboard: false,
            init_cmds: None,
            extra: Map::new(),
        }
    }

    pub fn onboard(mut self, onboard: bool) -> Self {
        self.onboard = onboard;
        self
    }

    pub fn init_cmds(mut self, init_cmds: Option<String>) -> Self {
        self.init_cmds = init_cmds;
        self
    }
}

/// Launch descriptor for a debug server process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub executable: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    /// Substring printed by the server once its GDB listener is up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_pattern: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerDescriptor {
    pub fn new(package: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            executable: executable.into(),
            arguments: Vec::new(),
            ready_pattern: None,
            extra: Map::new(),
        }
    }

    /// No field set at all, e.g. a manifest tool entry without `server`.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn ready_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ready_pattern = Some(pattern.into());
        self
    }

    /// Executable followed by its arguments.
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.executable.clone())
            .chain(self.arguments.iter().cloned())
            .collect()
    }
}

impl BoardManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(id: impl Into<String>, json: &str) -> Result<Self> {
        let mut manifest: BoardManifest = serde_json::from_str(json)?;
        manifest.id = id.into();
        Ok(manifest)
    }

    /// Load a manifest file; the board id is the file stem.
    pub fn load(path: &Path) -> Result<Self> {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| DebugConfigError::InvalidManifest {
                path: path.to_path_buf(),
                reason: "no file name".to_string(),
            })?;
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(id, &contents).map_err(|e| DebugConfigError::InvalidManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn supports_upload(&self, protocol: &str) -> bool {
        self.upload.protocols.iter().any(|p| p == protocol)
    }

    /// True when the target ABI is 64-bit.
    pub fn is_64bit(&self) -> bool {
        self.build.mabi.contains("64")
    }
}
