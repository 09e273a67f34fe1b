//! CLI argument parsing for pdfdeck.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and conversion into the run
//! configuration.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use pdfdeck::config::{
    Config, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, OverwriteMode, PageNumber,
};
use pdfdeck::error::{DeckError, Result};

/// Reorder a working set of PDF files and run bulk assembly operations.
///
/// pdfdeck loads the given files into an ordered working set and runs one
/// operation across all of them: merge into one document, split every page
/// into its own file, rotate a page in every file, or remove a page from
/// every file.
#[derive(Parser, Debug)]
#[command(name = "pdfdeck")]
#[command(version)]
#[command(about = "Bulk PDF assembly: merge, split, rotate, remove", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// The operation to run over the working set.
    #[command(subcommand)]
    pub command: Command,
}

/// The four bulk operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge every loaded file into one document
    ///
    /// Pages keep their original order, and files contribute in the order
    /// they were loaded (after --order, if given). With --images, PNG and
    /// JPEG inputs are embedded one per page.
    Merge {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Write every page of every loaded file as its own document
    ///
    /// Outputs are named <basename>_page_<n>.pdf. Pages are processed in
    /// batches with a short pause in between so the process stays responsive
    /// during large splits.
    Split {
        #[command(flatten)]
        common: CommonArgs,

        /// Pages per batch before yielding
        #[arg(long, value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Pause between batches, in milliseconds
        #[arg(long, value_name = "MS", default_value_t = DEFAULT_BATCH_DELAY.as_millis() as u64)]
        batch_delay_ms: u64,
    },

    /// Rotate one page of every loaded file by a quarter turn
    ///
    /// The same 1-based page number is applied to every file. Rotation is
    /// cumulative: running the command again on its output adds another 90
    /// degrees. Outputs are named <basename>_rotated.pdf.
    Rotate {
        #[command(flatten)]
        common: CommonArgs,

        /// 1-based page number, applied to every file
        #[arg(short, long, value_name = "N")]
        page: String,
    },

    /// Remove one page from every loaded file
    ///
    /// The same 1-based page number is applied to every file; single-page
    /// files refuse removal. Outputs are named <basename>_removed.pdf.
    Remove {
        #[command(flatten)]
        common: CommonArgs,

        /// 1-based page number, applied to every file
        #[arg(short, long, value_name = "N")]
        page: String,
    },
}

/// Arguments shared by every operation.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Input files or glob patterns, loaded in the order given
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Directory output files are written into
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Also accept PNG/JPEG inputs (merge embeds them as full pages)
    #[arg(long)]
    pub images: bool,

    /// Reorder the loaded files before running, e.g. --order 3,1,2
    ///
    /// Positions are 1-based into the loaded list and must cover every file
    /// exactly once.
    #[arg(long, value_name = "LIST")]
    pub order: Option<String>,

    /// Never overwrite existing output files
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Overwrite existing output files (default)
    #[arg(short, long)]
    pub force: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the operation report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The shared arguments of whichever subcommand was given.
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Command::Merge { common }
            | Command::Split { common, .. }
            | Command::Rotate { common, .. }
            | Command::Remove { common, .. } => common,
        }
    }

    /// Convert CLI arguments to a validated run configuration.
    pub fn to_config(&self) -> Result<Config> {
        let common = self.common();

        let (batch_size, batch_delay) = match &self.command {
            Command::Split {
                batch_size,
                batch_delay_ms,
                ..
            } => (*batch_size, Duration::from_millis(*batch_delay_ms)),
            _ => (DEFAULT_BATCH_SIZE, DEFAULT_BATCH_DELAY),
        };

        let config = Config {
            output_dir: common.output_dir.clone(),
            accept_images: common.images,
            batch_size,
            batch_delay,
            overwrite_mode: match (common.force, common.no_clobber) {
                (_, true) => OverwriteMode::NoClobber,
                _ => OverwriteMode::Force,
            },
            verbose: common.verbose,
            quiet: common.quiet,
            json: common.json,
        };

        config.validate()?;
        Ok(config)
    }

    /// The page selector for page-targeted operations.
    ///
    /// Parsed through [`PageNumber`] so bad input surfaces as a user-input
    /// error before any file is touched.
    pub fn page(&self) -> Result<Option<PageNumber>> {
        match &self.command {
            Command::Rotate { page, .. } | Command::Remove { page, .. } => {
                Ok(Some(page.parse()?))
            }
            _ => Ok(None),
        }
    }

    /// The reorder permutation, converted from 1-based positions to 0-based
    /// indices.
    pub fn parse_order(&self) -> Result<Option<Vec<usize>>> {
        let Some(order) = &self.common().order else {
            return Ok(None);
        };

        let mut indices = Vec::new();
        for part in order.split(',') {
            let part = part.trim();
            let position: usize = part.parse().map_err(|_| {
                DeckError::invalid_reorder(format!("'{part}' is not a position"))
            })?;
            if position == 0 {
                return Err(DeckError::invalid_reorder("positions are 1-based"));
            }
            indices.push(position - 1);
        }

        Ok(Some(indices))
    }
}
