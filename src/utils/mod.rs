//! Utilities for path collection, MIME detection, and artifact naming.

use crate::{Result, error::DeckError};
use std::path::{Path, PathBuf};

/// MIME type of every artifact this crate produces.
pub const PDF_MIME: &str = "application/pdf";

/// Filename of the merged output document.
pub const MERGED_FILENAME: &str = "merged_document.pdf";

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Literal paths that exist are passed through unchanged, so filenames with
/// glob metacharacters in them still resolve.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let pattern = pattern.as_ref();
        let literal = PathBuf::from(pattern);
        if literal.exists() {
            resolved_paths.push(literal);
            continue;
        }
        let paths = collect_paths_for_pattern(pattern)?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| DeckError::Other {
        message: err.to_string(),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| DeckError::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}

/// Guess the MIME type of a file from its extension.
///
/// Covers the types the registry accepts; anything else maps to a generic
/// binary type and gets counted as skipped on intake.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Strip a trailing `.pdf` (any case) from a file name.
///
/// Only a suffix is removed; a `.pdf` in the middle of the name stays.
pub fn pdf_basename(name: &str) -> &str {
    let len = name.len();
    if len >= 4 && name.is_char_boundary(len - 4) {
        let (stem, suffix) = name.split_at(len - 4);
        if suffix.eq_ignore_ascii_case(".pdf") {
            return stem;
        }
    }
    name
}

/// Artifact name for one page extracted by split.
///
/// `page_number` is 1-based.
pub fn split_page_filename(source_name: &str, page_number: usize) -> String {
    format!("{}_page_{}.pdf", pdf_basename(source_name), page_number)
}

/// Artifact name for a rotated copy of a file.
pub fn rotated_filename(source_name: &str) -> String {
    format!("{}_rotated.pdf", pdf_basename(source_name))
}

/// Artifact name for a copy of a file with one page removed.
pub fn removed_filename(source_name: &str) -> String {
    format!("{}_removed.pdf", pdf_basename(source_name))
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
