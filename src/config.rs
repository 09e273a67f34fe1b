//! Configuration module for pdfdeck.
//!
//! This module transforms CLI arguments into a validated, normalized
//! configuration that drives the bulk operations. It handles:
//! - Validation of argument combinations
//! - Application of defaults
//! - Parsing of the 1-based page selector

use anyhow::{Result as AnyResult, bail};

use crate::error::DeckError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default number of split outputs produced between yields.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Default pause between split batches.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(500);

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Always overwrite without prompting (default).
    #[default]
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// A 1-based page selector supplied by the user.
///
/// Parsing only checks that the input is a positive integer; whether the page
/// exists is evaluated per file when an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber(u32);

impl PageNumber {
    /// Create a page number from a 1-based value.
    ///
    /// # Errors
    ///
    /// Returns an error if `number` is zero.
    pub fn new(number: u32) -> crate::Result<Self> {
        if number == 0 {
            return Err(DeckError::InvalidPageNumber {
                input: "0".to_string(),
            });
        }
        Ok(Self(number))
    }

    /// The 1-based page number as the user supplied it.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// The 0-based index used against a loaded document.
    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }
}

impl FromStr for PageNumber {
    type Err = DeckError;

    /// Parse a page number from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a positive integer.
    fn from_str(s: &str) -> crate::Result<Self> {
        let trimmed = s.trim();
        let number: u32 = trimmed.parse().map_err(|_| DeckError::InvalidPageNumber {
            input: s.to_string(),
        })?;
        Self::new(number).map_err(|_| DeckError::InvalidPageNumber {
            input: s.to_string(),
        })
    }
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete configuration for a pdfdeck run.
///
/// This structure contains all settings needed to run an operation,
/// derived and validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory artifacts are written into.
    pub output_dir: PathBuf,

    /// Accept `image/*` inputs in addition to PDFs.
    pub accept_images: bool,

    /// Number of split outputs produced before yielding.
    pub batch_size: usize,

    /// Pause between split batches.
    pub batch_delay: Duration,

    /// File overwrite behavior for emitted artifacts.
    pub overwrite_mode: OverwriteMode,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print the operation report as JSON.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            accept_images: false,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            overwrite_mode: OverwriteMode::Force,
            verbose: false,
            quiet: false,
            json: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - Batch size is zero
    pub fn validate(&self) -> AnyResult<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.batch_size == 0 {
            bail!("Batch size must be at least 1");
        }

        Ok(())
    }

    /// Check if output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}
