//! spnote - Structured Note Simulation CLI
//!
//! Evaluates capital-protected notes with income barrier coupons against
//! asset price history.
//!
//! # Commands
//!
//! - `spnote simulate --product <file> --assets <file>` - Evaluate a note and
//!   print its chart data or event table
//! - `spnote check --product <file>` - Validate a product definition
//!
//! # Configuration
//!
//! Settings come from `spnote.toml` (or `--config`), overridden by
//! `SPNOTE_OUTPUT_FORMAT`, `SPNOTE_PERCENT_PRECISION` and `SPNOTE_LOG_LEVEL`.
//! `RUST_LOG` takes precedence over the configured log level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod loader;

pub use error::{CliError, Result};

use config::{CliConfig, OutputFormat};

/// Structured note simulation CLI
#[derive(Parser)]
#[command(name = "spnote")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "spnote.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a product against asset prices
    Simulate {
        /// Product definition (JSON/TOML)
        #[arg(short, long)]
        product: PathBuf,

        /// Asset prices (CSV/JSON)
        #[arg(short, long)]
        assets: PathBuf,

        /// Output format, defaults to the configured one
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file, stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a product definition
    Check {
        /// Product definition (JSON/TOML)
        #[arg(short, long)]
        product: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load_with_env_and_validate(&cli.config)?;

    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Simulate {
            product,
            assets,
            format,
            output,
        } => commands::simulate::run(
            &product,
            &assets,
            format.unwrap_or(config.output_format),
            output.as_deref(),
            config.percent_precision,
        )?,
        Commands::Check { product } => commands::check::run(&product, config.percent_precision)?,
    }
    Ok(())
}
