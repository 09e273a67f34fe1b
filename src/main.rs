//! pdfdeck - Bulk PDF assembly from the command line.
//!
//! Loads the given files into an ordered working set and runs one bulk
//! operation across all of them, writing the outputs into a directory.

mod cli;

use clap::Parser;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::PathBuf;
use std::process;

use crate::cli::{Cli, Command};
use pdfdeck::config::Config;
use pdfdeck::error::DeckError;
use pdfdeck::ops::{OperationReport, Orchestrator};
use pdfdeck::output::{OutputFormatter, display_append_outcome, display_report};
use pdfdeck::registry::{FileRegistry, InputFile};
use pdfdeck::sink::DirectorySink;
use pdfdeck::utils;

/// Concurrent file reads during intake.
const READ_CONCURRENCY: usize = 4;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), DeckError> {
    let config = cli.to_config()?;
    let page = cli.page()?;
    let order = cli.parse_order()?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.info(&format!("{} v{}", pdfdeck::NAME, pdfdeck::VERSION));
        formatter.blank_line();
    }

    // Build the working set
    let mut registry = load_registry(&cli, &config, &formatter).await?;

    if let Some(order) = order {
        registry.reorder(&order)?;
        formatter.info("Reordered:");
    }

    for (index, file) in registry.files().iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!("{} ({})", file.name(), file.format_size()),
        );
    }
    formatter.blank_line();

    // Run the operation against a fixed snapshot
    let snapshot = registry.snapshot();
    let sink = DirectorySink::new(config.output_dir.clone(), config.overwrite_mode)?;
    let orchestrator = Orchestrator::from_config(&config);

    let report = match &cli.command {
        Command::Merge { .. } => {
            formatter.info("Merging documents...");
            orchestrator.merge(&snapshot, &sink).await?
        }
        Command::Split { .. } => {
            formatter.info("Splitting pages...");
            orchestrator
                .split_with_progress(&snapshot, &sink, |count, filename| {
                    formatter.debug(&format!("[{count}] {filename}"));
                })
                .await?
        }
        Command::Rotate { .. } => {
            let Some(page) = page else {
                return Err(DeckError::other("rotate requires --page"));
            };
            formatter.info(&format!("Rotating page {page}..."));
            orchestrator.rotate_page(&snapshot, page, &sink).await?
        }
        Command::Remove { .. } => {
            let Some(page) = page else {
                return Err(DeckError::other("remove requires --page"));
            };
            formatter.info(&format!("Removing page {page}..."));
            orchestrator.remove_page(&snapshot, page, &sink).await?
        }
    };

    emit_report(&config, &formatter, &report)?;

    Ok(())
}

/// Expand the inputs, read them into memory, and fill the registry.
async fn load_registry(
    cli: &Cli,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<FileRegistry, DeckError> {
    let paths = utils::collect_paths_for_patterns(&cli.common().inputs)?;
    if paths.is_empty() {
        return Err(DeckError::EmptyRegistry);
    }

    // Reads run concurrently but results keep command-line order, which is
    // the registry order.
    let files: Vec<InputFile> = stream::iter(paths.into_iter().map(read_input))
        .buffered(READ_CONCURRENCY)
        .try_collect()
        .await?;

    let mut registry = if config.accept_images {
        FileRegistry::accepting_images()
    } else {
        FileRegistry::new()
    };

    let outcome = registry.append(files);
    display_append_outcome(formatter, &outcome);

    if registry.is_empty() {
        return Err(DeckError::EmptyRegistry);
    }

    Ok(registry)
}

/// Read one input file fully into memory.
async fn read_input(path: PathBuf) -> Result<InputFile, DeckError> {
    let bytes = tokio::fs::read(&path).await?;
    let mime = utils::mime_for_path(&path);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(InputFile::new(name, mime, bytes))
}

/// Print the operation report, as JSON or formatted text.
fn emit_report(
    config: &Config,
    formatter: &OutputFormatter,
    report: &OperationReport,
) -> Result<(), DeckError> {
    if config.json {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| DeckError::other(format!("Failed to encode report: {e}")))?;
        println!("{json}");
    } else {
        formatter.blank_line();
        display_report(formatter, report);
    }

    Ok(())
}
