//! Debug session setup
//!
//! A session starts from a resolved tool descriptor and may refine it, e.g.
//! with a user-requested adapter speed. Refinements apply to the session copy
//! only; the board's tool catalog keeps its static entries.

use serde::Serialize;
use tracing::debug;

use crate::error::{DebugConfigError, Result};
use crate::manifest::{BoardManifest, ServerDescriptor, ToolDescriptor};

/// Launch configuration for a single debug session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSession {
    pub board: String,
    pub tool: String,
    /// Adapter speed requested for this session, if any
    pub speed: Option<String>,
    #[serde(flatten)]
    pub descriptor: ToolDescriptor,
}

impl DebugSession {
    pub fn server(&self) -> &ServerDescriptor {
        &self.descriptor.server
    }
}

/// Append adapter speed arguments understood by the server executable.
///
/// OpenOCD and J-Link servers get their own flag syntax; anything else
/// (emulators, unknown servers) is left as is.
pub fn apply_speed(server: &mut ServerDescriptor, speed: &str) {
    if speed.is_empty() {
        return;
    }
    let executable = server.executable.to_lowercase();
    if executable.contains("openocd") {
        server
            .arguments
            .extend(["-c".to_string(), format!("adapter speed {}", speed)]);
    } else if executable.contains("jlink") {
        server
            .arguments
            .extend(["-speed".to_string(), speed.to_string()]);
    } else {
        debug!("No speed setting for {}", server.executable);
    }
}

/// Build the session configuration for `tool` on an already resolved board.
///
/// `speed` overrides the board's default `debug.speed`.
pub fn configure_debug_session(
    board: &BoardManifest,
    tool: &str,
    speed: Option<&str>,
) -> Result<DebugSession> {
    let mut descriptor = board
        .debug
        .tools
        .get(tool)
        .cloned()
        .ok_or_else(|| DebugConfigError::ToolNotAvailable {
            board: board.id.clone(),
            tool: tool.to_string(),
        })?;

    let speed = speed
        .filter(|s| !s.is_empty())
        .or_else(|| board.debug.speed.as_deref().filter(|s| !s.is_empty()))
        .map(str::to_string);
    if let Some(speed) = &speed {
        apply_speed(&mut descriptor.server, speed);
    }

    Ok(DebugSession {
        board: board.id.clone(),
        tool: tool.to_string(),
        speed,
        descriptor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HostPlatform;
    use crate::resolver::resolve_debug_tools;
    use std::path::PathBuf;

    fn openocd_server() -> ServerDescriptor {
        ServerDescriptor::new("tool-openocd-riscv", "bin/openocd")
            .args(["-s", "$PACKAGE_DIR/share/openocd/scripts"])
    }

    #[test]
    fn test_openocd_speed() {
        let mut server = openocd_server();
        apply_speed(&mut server, "4000");
        assert_eq!(&server.arguments[2..], ["-c", "adapter speed 4000"]);
    }

    #[test]
    fn test_jlink_speed_case_insensitive() {
        let mut server = ServerDescriptor::new("tool-jlink", "JLinkGDBServerCL.exe").args(["-port", "2331"]);
        apply_speed(&mut server, "12000");
        assert_eq!(server.arguments, vec!["-port", "2331", "-speed", "12000"]);
    }

    #[test]
    fn test_emulator_and_unknown_untouched() {
        let mut qemu = ServerDescriptor::new("tool-qemu-riscv", "bin/qemu-system-riscv32").args(["-S"]);
        apply_speed(&mut qemu, "4000");
        assert_eq!(qemu.arguments, vec!["-S"]);

        let mut other = ServerDescriptor::new("x", "pyocd");
        apply_speed(&mut other, "4000");
        assert!(other.arguments.is_empty());
    }

    #[test]
    fn test_empty_speed_is_noop() {
        let mut server = openocd_server();
        apply_speed(&mut server, "");
        assert_eq!(server.arguments.len(), 2);
    }

    fn resolved_board() -> BoardManifest {
        let mut board = BoardManifest::from_json(
            "hifive1-revb",
            r#"{"upload": {"protocols": ["jlink"]},
                "debug": {"jlink_device": "FE310", "qemu_machine": "sifive_e", "speed": "1000"}}"#,
        )
        .unwrap();
        let no_packages = |_: &str| -> Option<PathBuf> { None };
        resolve_debug_tools(&mut board, HostPlatform::unix(), &no_packages).unwrap();
        board
    }

    #[test]
    fn test_session_uses_override_then_board_default() {
        let board = resolved_board();

        let session = configure_debug_session(&board, "jlink", Some("4000")).unwrap();
        assert_eq!(session.speed.as_deref(), Some("4000"));
        assert_eq!(session.server().arguments[session.server().arguments.len() - 2..], ["-speed", "4000"]);

        let session = configure_debug_session(&board, "jlink", None).unwrap();
        assert_eq!(session.speed.as_deref(), Some("1000"));
        assert!(session.server().arguments.ends_with(&["-speed".to_string(), "1000".to_string()]));

        // catalog entry stays static
        assert!(!board.debug.tools["jlink"].server.arguments.contains(&"-speed".to_string()));
    }

    #[test]
    fn test_empty_override_falls_back_to_board_speed() {
        let board = resolved_board();
        let session = configure_debug_session(&board, "jlink", Some("")).unwrap();
        assert_eq!(session.speed.as_deref(), Some("1000"));
        assert!(session.server().arguments.ends_with(&["-speed".to_string(), "1000".to_string()]));
    }

    #[test]
    fn test_session_qemu_ignores_speed() {
        let board = resolved_board();
        let session = configure_debug_session(&board, "qemu", Some("4000")).unwrap();
        assert_eq!(session.server().arguments, board.debug.tools["qemu"].server.arguments);
    }

    #[test]
    fn test_session_unknown_tool() {
        let board = resolved_board();
        let err = configure_debug_session(&board, "ftdi", None).unwrap_err();
        assert!(matches!(err, DebugConfigError::ToolNotAvailable { .. }));
        assert!(err.to_string().contains("hifive1-revb"));
    }

    #[test]
    fn test_session_serializes_flat() {
        let board = resolved_board();
        let session = configure_debug_session(&board, "jlink", None).unwrap();
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["tool"], "jlink");
        assert_eq!(value["server"]["executable"], "JLinkGDBServer");
    }
}
