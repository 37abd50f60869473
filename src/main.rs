//! metricsctx - pluggable metrics context registry
//!
//! Command-line entry point for inspecting how configured context names
//! resolve to reporting backends.

mod cli;
mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use metricsctx_config::FileConfigSource;
use metricsctx_core::{BackendCatalog, ContextRegistry};

use crate::cli::{Cli, Commands};

/// Get the .metricsctx directory path.
fn metricsctx_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".metricsctx"))
        .unwrap_or_else(|| PathBuf::from(".metricsctx"))
}

/// Initialize tracing with stderr and daily rolling file output.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = metricsctx_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("metricsctx")
        .filename_suffix("log")
        .max_log_files(7)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive until exit
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Open the registry named by `--config`, or the process-wide one.
fn open_registry(config: Option<PathBuf>) -> Result<Arc<ContextRegistry>, Box<dyn std::error::Error>> {
    let registry = match config {
        Some(path) => Arc::new(ContextRegistry::load(
            &FileConfigSource::new(path),
            BackendCatalog::global(),
        )?),
        None => metricsctx_core::global()?,
    };
    Ok(registry)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let registry = open_registry(cli.config)?;

    match cli.command {
        Commands::Attributes => commands::list_attributes(&registry, &cli.format),
        Commands::Resolve { names, context } => {
            commands::resolve(&registry, &names, context.as_deref(), &cli.format)
        }
        Commands::Classes => commands::list_classes(&BackendCatalog::global(), &cli.format),
    }
}
