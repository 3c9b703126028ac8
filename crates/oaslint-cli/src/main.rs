//! oaslint CLI tool.
//!
//! Usage:
//! ```bash
//! oaslint lint [OPTIONS] <FILES>...
//! oaslint list-rules
//! oaslint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use oaslint_core::Preset;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Linter for OpenAPI 3.x and Swagger 2.0 documents
#[derive(Parser)]
#[command(name = "oaslint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "OASLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint OpenAPI documents
    Lint(commands::lint::LintArgs),

    /// List available rules
    ListRules {
        /// Show which rules this preset enables
        #[arg(long)]
        preset: Option<Preset>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: ListFormat,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Source excerpts rendered with miette.
    Pretty,
}

/// Output format for the rule listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    /// Aligned table.
    #[default]
    Text,
    /// JSON array.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());

    match cli.command {
        Commands::Lint(args) => {
            let failed = commands::lint::run(&args, &source)?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules { preset, format } => commands::list_rules::run(&source, preset, format),
        Commands::Init { force } => commands::init::run(Path::new("."), force),
    }
}
