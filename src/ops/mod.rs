//! Bulk operation orchestration.
//!
//! The [`Orchestrator`] turns the four bulk operations (merge, split, rotate,
//! remove) into deterministic traversals over a registry snapshot. It owns the
//! scheduling policy (split's batching) and the mutual-exclusion gate that
//! keeps two operations from running at once.
//!
//! Operations never mutate the registry: they read an immutable snapshot taken
//! at trigger time and hand every output to a [`DownloadSink`].
//!
//! [`DownloadSink`]: crate::sink::DownloadSink

mod merge;
mod remove;
mod rotate;
mod split;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::{Config, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
use crate::error::{DeckError, Result};
use crate::registry::InputFile;

/// Which bulk operation produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    /// All files combined into one document.
    Merge,
    /// Every page written as its own document.
    Split,
    /// One page rotated in every file.
    Rotate,
    /// One page removed from every file.
    Remove,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Merge => "merge",
            Self::Split => "split",
            Self::Rotate => "rotate",
            Self::Remove => "remove",
        };
        write!(f, "{name}")
    }
}

/// Summary of a completed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport {
    /// The operation that ran.
    pub operation: OperationKind,

    /// Number of input files that contributed to the output.
    pub files_processed: usize,

    /// Total pages copied, rotated, or removed across all files.
    pub pages_processed: usize,

    /// Number of artifacts handed to the sink.
    pub artifacts_emitted: usize,

    /// Wall-clock time the operation took.
    pub elapsed: Duration,
}

/// Runs bulk operations over registry snapshots.
///
/// One orchestrator admits one operation at a time; a second trigger while an
/// operation is in flight fails with [`DeckError::OperationInFlight`].
pub struct Orchestrator {
    batch_size: usize,
    batch_delay: Duration,
    busy: AtomicBool,
}

impl Orchestrator {
    /// Create an orchestrator with the default batching policy.
    pub fn new() -> Self {
        Self::with_batching(DEFAULT_BATCH_SIZE, DEFAULT_BATCH_DELAY)
    }

    /// Create an orchestrator with an explicit batching policy.
    ///
    /// `batch_size` is the number of split outputs produced before yielding;
    /// `batch_delay` is how long the task suspends between batches.
    pub fn with_batching(batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            batch_delay,
            busy: AtomicBool::new(false),
        }
    }

    /// Create an orchestrator from a run configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_batching(config.batch_size, config.batch_delay)
    }

    /// Whether an operation is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Acquire the mutual-exclusion gate for one operation.
    ///
    /// The returned guard releases the gate when dropped, on every exit path,
    /// so a failed operation can never leave the orchestrator locked.
    fn begin(&self) -> Result<OperationGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(DeckError::OperationInFlight);
        }
        Ok(OperationGuard { busy: &self.busy })
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

struct OperationGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Reject an operation triggered against an empty snapshot before any codec
/// call is made.
fn require_files(files: &[InputFile]) -> Result<()> {
    if files.is_empty() {
        return Err(DeckError::EmptyRegistry);
    }
    Ok(())
}
