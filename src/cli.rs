//! CLI definitions for metricsctx.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// metricsctx CLI.
#[derive(Parser)]
#[command(name = "metricsctx")]
#[command(about = "Inspect metrics contexts resolved from configuration")]
#[command(version)]
pub(crate) struct Cli {
    /// Metrics configuration file (defaults to $METRICSCTX_CONFIG or ./metrics.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(long, default_value = "table", global = true)]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List configured attributes
    Attributes,

    /// Resolve one or more contexts and show their backends
    Resolve {
        /// Names to look up
        #[arg(required = true)]
        names: Vec<String>,

        /// Initialize and cache under this name instead of the looked-up name
        #[arg(long)]
        context: Option<String>,
    },

    /// List registered backend classes
    Classes,
}
