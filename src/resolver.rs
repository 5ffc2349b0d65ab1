//! Debug tool resolution
//!
//! Walks a fixed catalog of debug tools and, for every tool a board supports,
//! synthesizes the server launch descriptor a debug session needs. Hardware
//! probes apply when they are listed as upload protocols; emulators apply when
//! the board names a machine for them.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{DebugConfigError, Result};
use crate::manifest::{BoardManifest, ServerDescriptor, ToolDescriptor};
use crate::packages::PackageDirLookup;
use crate::platform::HostPlatform;

const JLINK_PACKAGE: &str = "tool-jlink";
const QEMU_PACKAGE: &str = "tool-qemu-riscv";
const RENODE_PACKAGE: &str = "tool-renode";
const OPENOCD_PACKAGE: &str = "tool-openocd-riscv";
/// Board support package carrying per-board OpenOCD configs
pub const SDK_PACKAGE: &str = "framework-freedom-e-sdk";

const JLINK_GDB_PORT: u16 = 2331;
const QEMU_GDB_PORT: u16 = 1234;
const RENODE_GDB_PORT: u16 = 3333;

pub const RENODE_READY_PATTERN: &str = "GDB server with all CPUs started on port";

/// JTAG adapters driven through OpenOCD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenOcdAdapter {
    Ftdi,
    Minimodule,
    OlimexArmUsbTinyH,
    OlimexArmUsbOcdH,
    OlimexArmUsbOcd,
    OlimexJtagTiny,
    Tumpa,
}

impl OpenOcdAdapter {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ftdi => "ftdi",
            Self::Minimodule => "minimodule",
            Self::OlimexArmUsbTinyH => "olimex-arm-usb-tiny-h",
            Self::OlimexArmUsbOcdH => "olimex-arm-usb-ocd-h",
            Self::OlimexArmUsbOcd => "olimex-arm-usb-ocd",
            Self::OlimexJtagTiny => "olimex-jtag-tiny",
            Self::Tumpa => "tumpa",
        }
    }
}

/// A debug tool known to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugTool {
    JLink,
    Qemu,
    Renode,
    OpenOcd(OpenOcdAdapter),
}

impl DebugTool {
    /// Every tool the resolver considers, in resolution order.
    pub const CATALOG: [DebugTool; 10] = [
        DebugTool::JLink,
        DebugTool::Qemu,
        DebugTool::Renode,
        DebugTool::OpenOcd(OpenOcdAdapter::Ftdi),
        DebugTool::OpenOcd(OpenOcdAdapter::Minimodule),
        DebugTool::OpenOcd(OpenOcdAdapter::OlimexArmUsbTinyH),
        DebugTool::OpenOcd(OpenOcdAdapter::OlimexArmUsbOcdH),
        DebugTool::OpenOcd(OpenOcdAdapter::OlimexArmUsbOcd),
        DebugTool::OpenOcd(OpenOcdAdapter::OlimexJtagTiny),
        DebugTool::OpenOcd(OpenOcdAdapter::Tumpa),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::JLink => "jlink",
            Self::Qemu => "qemu",
            Self::Renode => "renode",
            Self::OpenOcd(adapter) => adapter.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::CATALOG.into_iter().find(|tool| tool.name() == name)
    }

    pub fn is_emulator(self) -> bool {
        matches!(self, Self::Qemu | Self::Renode)
    }

    /// Whether this tool should be added to `board`.
    fn applies_to(self, board: &BoardManifest) -> bool {
        if board.debug.tools.contains_key(self.name()) {
            return false;
        }
        match self {
            Self::Qemu => board.debug.qemu_machine().is_some(),
            Self::Renode => board.debug.renode_machine().is_some(),
            Self::JLink | Self::OpenOcd(_) => board.supports_upload(self.name()),
        }
    }

    fn descriptor(
        self,
        board: &BoardManifest,
        host: HostPlatform,
        packages: &dyn PackageDirLookup,
    ) -> Result<ToolDescriptor> {
        match self {
            Self::JLink => jlink(board, host),
            Self::Qemu => Ok(qemu(board)),
            Self::Renode => renode(board, host),
            Self::OpenOcd(adapter) => openocd(board, adapter, packages),
        }
    }
}

impl fmt::Display for DebugTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Populate `board.debug.tools` with every applicable catalog tool.
///
/// Existing entries are never replaced. On error the board is left untouched:
/// new entries are merged only after every applicable tool resolved.
pub fn resolve_debug_tools(
    board: &mut BoardManifest,
    host: HostPlatform,
    packages: &dyn PackageDirLookup,
) -> Result<()> {
    let mut resolved = Vec::new();
    for tool in DebugTool::CATALOG {
        if !tool.applies_to(board) {
            continue;
        }
        let descriptor = tool.descriptor(board, host, packages)?;
        debug!(
            "Board {}: {} -> {} {:?}",
            board.id, tool, descriptor.server.executable, descriptor.server.arguments
        );
        resolved.push((tool, descriptor));
    }

    board
        .debug
        .tools
        .extend(resolved.into_iter().map(|(tool, d)| (tool.name().to_string(), d)));
    Ok(())
}

fn jlink(board: &BoardManifest, host: HostPlatform) -> Result<ToolDescriptor> {
    let device = board
        .debug
        .jlink_device()
        .ok_or_else(|| DebugConfigError::MissingAttribute {
            board: board.id.clone(),
            attribute: "jlink device",
        })?;

    let server = ServerDescriptor::new(
        JLINK_PACKAGE,
        host.select("JLinkGDBServerCL.exe", "JLinkGDBServer"),
    )
    .args([
        "-singlerun",
        "-if",
        "JTAG",
        "-select",
        "USB",
        "-jtagconf",
        "-1,-1",
        "-device",
        device,
        "-port",
    ])
    .args([JLINK_GDB_PORT.to_string()]);

    Ok(ToolDescriptor::new(server).onboard(board.debug.is_onboard(DebugTool::JLink.name())))
}

fn qemu(board: &BoardManifest) -> ToolDescriptor {
    // applies_to only admits boards with a machine set
    let machine = board.debug.qemu_machine().unwrap_or_default();
    let bits = if board.is_64bit() { "64" } else { "32" };

    let server = ServerDescriptor::new(QEMU_PACKAGE, format!("bin/qemu-system-riscv{}", bits))
        .args(["-nographic", "-machine", machine, "-d", "unimp,guest_errors", "-gdb"])
        .args([format!("tcp::{}", QEMU_GDB_PORT), "-S".to_string()]);

    ToolDescriptor::new(server)
}

fn renode(board: &BoardManifest, host: HostPlatform) -> Result<ToolDescriptor> {
    let machine = board
        .debug
        .renode_machine()
        .ok_or_else(|| DebugConfigError::MissingAttribute {
            board: board.id.clone(),
            attribute: "renode machine",
        })?;

    // Renode resolves `@` paths itself, forward slashes work on every host
    let server = ServerDescriptor::new(RENODE_PACKAGE, host.select("bin/Renode", "renode"))
        .args(["--disable-xwt", "-e"])
        .args([
            format!("include @scripts/single-node/{}", machine),
            "-e".to_string(),
            format!("machine StartGdbServer {} True", RENODE_GDB_PORT),
        ])
        .ready_pattern(RENODE_READY_PATTERN);

    Ok(ToolDescriptor::new(server))
}

fn openocd(
    board: &BoardManifest,
    adapter: OpenOcdAdapter,
    packages: &dyn PackageDirLookup,
) -> Result<ToolDescriptor> {
    let sdk_dir = packages.package_dir(SDK_PACKAGE);
    if sdk_dir.is_none() {
        warn!("Board {}: package {} not found", board.id, SDK_PACKAGE);
    }

    let mut args = vec!["-s".to_string(), "$PACKAGE_DIR/share/openocd/scripts".to_string()];

    let board_cfg = sdk_dir
        .as_deref()
        .map(|sdk| bsp_config(sdk, &format!("sifive-{}", board.id)))
        .filter(|cfg| cfg.is_file());

    if let Some(cfg) = board_cfg {
        args.extend(["-f".to_string(), cfg.display().to_string()]);
    } else if let Some(legacy) = legacy_board_args(board, adapter, sdk_dir.as_deref()) {
        args.extend(legacy);
    } else {
        return Err(DebugConfigError::UnknownDebugConfiguration {
            board: board.id.clone(),
            tool: adapter.name().to_string(),
        });
    }

    let tool = DebugTool::OpenOcd(adapter);
    let server = ServerDescriptor::new(OPENOCD_PACKAGE, "bin/openocd").args(args);
    Ok(ToolDescriptor::new(server)
        .onboard(board.debug.is_onboard(tool.name()))
        .init_cmds(board.debug.init_cmds.clone()))
}

fn bsp_config(sdk_dir: &Path, bsp: &str) -> PathBuf {
    sdk_dir.join("bsp").join(bsp).join("openocd.cfg")
}

/// Special case: the E310 Arty board ships no combined OpenOCD config, so the
/// adapter interface and the board config are passed separately.
fn legacy_board_args(
    board: &BoardManifest,
    adapter: OpenOcdAdapter,
    sdk_dir: Option<&Path>,
) -> Option<Vec<String>> {
    if board.id != "e310-arty" {
        return None;
    }
    let interface = match adapter {
        OpenOcdAdapter::Ftdi => "arty-onboard-ftdi",
        other => other.name(),
    };
    let board_cfg = bsp_config(sdk_dir.unwrap_or_else(|| Path::new("")), "freedom-e310-arty");
    Some(vec![
        "-f".to_string(),
        format!("interface/ftdi/{}.cfg", interface),
        "-f".to_string(),
        board_cfg.display().to_string(),
    ])
}
