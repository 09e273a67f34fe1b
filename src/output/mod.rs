//! Output formatting and display for pdfdeck.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The numbered file list
//! - Error and warning display
//! - Operation summaries
//! - Quiet and verbose modes

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::ops::{OperationKind, OperationReport};
use crate::registry::AppendOutcome;

/// Display an intake outcome to the user.
///
/// Skipped files get a warning; the load count is informational.
pub fn display_append_outcome(formatter: &OutputFormatter, outcome: &AppendOutcome) {
    if outcome.skipped > 0 {
        formatter.warning(&format!(
            "{} unsupported file(s) skipped",
            outcome.skipped
        ));
    }

    formatter.info(&format!("{} file(s) loaded", outcome.added));
}

/// Display an operation report to the user.
pub fn display_report(formatter: &OutputFormatter, report: &OperationReport) {
    let message = match report.operation {
        OperationKind::Merge => format!(
            "Merged {} file(s) into {} page(s)",
            report.files_processed, report.pages_processed
        ),
        OperationKind::Split => format!(
            "Split {} file(s) into {} output file(s)",
            report.files_processed, report.artifacts_emitted
        ),
        OperationKind::Rotate => format!(
            "Rotated a page in {} file(s)",
            report.files_processed
        ),
        OperationKind::Remove => format!(
            "Removed a page from {} file(s)",
            report.files_processed
        ),
    };

    formatter.success(&message);
    formatter.detail("Artifacts", &report.artifacts_emitted.to_string());
    formatter.detail(
        "Elapsed",
        &format!("{:.2}s", report.elapsed.as_secs_f64()),
    );
}
