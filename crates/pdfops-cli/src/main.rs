//! pdfops - merge, reorder and split PDF documents.
//!
//! Thin command layer over the `pdfops` library: parses arguments, runs one
//! operation and maps its error to the process exit code.

mod cli;

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, CommandConfig};
use pdfops::error::PdfOpsError;
use pdfops::ops::{Merger, Reorderer, Splitter};
use pdfops::output::{
    OutputFormatter, display_merge_report, display_reorder_report, display_split_report,
    print_json,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Send diagnostics to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "pdfops=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfOpsError> {
    let command = cli.to_command()?;
    let options = command.options().clone();
    let formatter = OutputFormatter::from_options(&options);

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", pdfops::NAME, pdfops::VERSION));
        formatter.blank_line();
    }

    match command {
        CommandConfig::Merge(config) => {
            let report = Merger::new(formatter.clone()).merge(&config).await?;
            if options.json {
                print_json(&report)?;
            } else {
                display_merge_report(&formatter, &report);
            }
        }
        CommandConfig::Reorder(config) => {
            let report = Reorderer::new(formatter.clone()).reorder(&config).await?;
            if options.json {
                print_json(&report)?;
            } else {
                display_reorder_report(&formatter, &report);
            }
        }
        CommandConfig::Split(config) => {
            let report = Splitter::new(formatter.clone()).split(&config).await?;
            if options.json {
                print_json(&report)?;
            } else {
                display_split_report(&formatter, &report);
            }
        }
    }

    Ok(())
}
