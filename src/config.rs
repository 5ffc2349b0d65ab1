//! Configuration for the board-debug MCP server

use std::path::PathBuf;
use clap::Parser;

use crate::packages::PackageDirs;
use crate::platform::HostPlatform;
use crate::resolver::SDK_PACKAGE;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "board-debug")]
#[command(about = "MCP server for board debug tool configuration")]
#[command(version)]
pub struct Args {
    /// Directory containing board manifests (<board-id>.json)
    #[arg(short, long)]
    pub boards_dir: Option<PathBuf>,

    /// Root directory of installed packages (one subdirectory per package)
    #[arg(long)]
    pub packages_dir: Option<PathBuf>,

    /// Board support SDK directory (overrides lookup under packages dir)
    #[arg(long)]
    pub sdk_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file path (defaults to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct Config {
    pub boards_dir: PathBuf,
    pub packages_dir: Option<PathBuf>,
    pub sdk_dir: Option<PathBuf>,
    /// Host the debug servers will run on
    pub host: HostPlatform,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            boards_dir: args.boards_dir.clone().unwrap_or_else(|| PathBuf::from("boards")),
            packages_dir: args.packages_dir.clone(),
            sdk_dir: args.sdk_dir.clone(),
            host: HostPlatform::current(),
        }
    }

    /// Package directory lookup for debug tool resolution
    pub fn package_dirs(&self) -> PackageDirs {
        let dirs = PackageDirs::new(self.packages_dir.clone());
        match &self.sdk_dir {
            Some(sdk) => dirs.with_override(SDK_PACKAGE, sdk.clone()),
            None => dirs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boards_dir: PathBuf::from("boards"),
            packages_dir: None,
            sdk_dir: None,
            host: HostPlatform::current(),
        }
    }
}
