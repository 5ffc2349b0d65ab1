//! Board Debug MCP Server entry point

use clap::Parser;
use tracing::{info, error, debug};
use tracing_subscriber::{EnvFilter, fmt, fmt::writer::BoxMakeWriter};
use rmcp::{ServiceExt, transport::stdio};
use std::fs::OpenOptions;
use std::sync::Arc;

use board_debug::{Args, Config, BoardDebugToolHandler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    info!("Starting Board Debug MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_args(&args);
    let handler = BoardDebugToolHandler::new(config)?;

    let service = handler
        .serve(stdio()).await.inspect_err(|e| {
            error!("Serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}

/// Log destination: `--log-file` in append mode, otherwise stderr.
/// stdout carries the MCP transport.
fn log_writer(args: &Args) -> std::io::Result<BoxMakeWriter> {
    match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(BoxMakeWriter::new(Arc::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(log_writer(args)?)
        .with_ansi(args.log_file.is_none())
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    debug!(level = %args.log_level, log_file = ?args.log_file, "Logging initialized");
    Ok(())
}
