//! # trellis-cli
//!
//! Command line front end for Trellis.
//!
//! Parses arguments, sets up logging and the panic hook, then hands the
//! selected subcommand to [`commands::dispatch_command`].

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use trellis_core::error::{TrellisError, TrellisResult};

mod commands;
mod output;

use commands::CommandContext;
use output::colors::ColorSupport;
use output::errors::ErrorFormatter;
use output::OutputHandler;

/// Generate Swift package manifests from dependency descriptions
#[derive(Parser)]
#[command(name = "trellis", version, about = "Swift package manifest generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never color status lines or errors
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize Package.swift from a dependency description
    Manifest {
        /// Description file (Dependencies.toml or Dependencies.json)
        #[arg(value_name = "PATH")]
        path: Option<Utf8PathBuf>,

        /// Write the manifest to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<Utf8PathBuf>,
    },
    /// Print the canonical encoding of a file selector list
    Files {
        #[arg(value_name = "PATH")]
        path: Utf8PathBuf,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting trellis v{}", env!("CARGO_PKG_VERSION"));

    let no_color = cli.no_color;
    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let formatter = if no_color {
                ErrorFormatter::with_colors(ColorSupport::disabled())
            } else {
                ErrorFormatter::new()
            };
            eprintln!("{}", formatter.format_error(&err));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> TrellisResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| TrellisError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let output = if cli.no_color {
            OutputHandler::plain()
        } else {
            OutputHandler::new()
        };
        let ctx = CommandContext::new(output)?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn log_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    ["trellis", "trellis_core", "trellis_config", "trellis_queue"]
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

fn setup_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("trellis encountered an unexpected error: {}", panic_info);
        eprintln!("trellis crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
