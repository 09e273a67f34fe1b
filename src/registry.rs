//! The ordered working set of uploaded files.
//!
//! A [`FileRegistry`] holds the files an operation will run over, in the order
//! the user arranged them. Intake filters by MIME type, reordering is
//! validated, and operations consume an immutable [`FileRegistry::snapshot`]
//! so later mutation cannot change what a running operation processes.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::DeckError;
use crate::utils::{PDF_MIME, format_file_size};

/// One file in the working set.
///
/// Immutable once created; the underlying bytes are shared, so cloning an
/// `InputFile` (and taking registry snapshots) is cheap. Identity is the
/// file's position in the registry; two entries with the same name are
/// distinct files.
#[derive(Debug, Clone)]
pub struct InputFile {
    name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl InputFile {
    /// Wrap raw file content for intake.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// The file name as supplied on intake.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The MIME type as supplied on intake.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The file's raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A shared handle to the file's bytes, for handing to blocking tasks.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size of the file in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Human-readable size for list rendering.
    pub fn format_size(&self) -> String {
        format_file_size(self.size())
    }

    /// Whether the file is a PDF.
    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }

    /// Whether the file is an image.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Outcome of one intake batch: how many files were kept and how many were
/// dropped for having an unsupported type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendOutcome {
    /// Files appended to the registry.
    pub added: usize,

    /// Files dropped for having an unsupported MIME type.
    pub skipped: usize,
}

impl AppendOutcome {
    /// One-line status text, e.g. `"2 file(s) added, 1 skipped"`.
    pub fn summary(&self) -> String {
        format!("{} file(s) added, {} skipped", self.added, self.skipped)
    }
}

/// Ordered sequence of input files.
///
/// Insertion order is significant and duplicates are permitted. The sequence
/// rendered to the user and the sequence the next operation runs over are
/// always the same object.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: Vec<InputFile>,
    accept_images: bool,
}

impl FileRegistry {
    /// Create an empty registry that accepts PDF files only.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            accept_images: false,
        }
    }

    /// Create an empty registry that also accepts `image/*` files.
    pub fn accepting_images() -> Self {
        Self {
            files: Vec::new(),
            accept_images: true,
        }
    }

    /// Append a batch of files, keeping only supported types.
    ///
    /// Unsupported files are counted and dropped, never stored; skipping is
    /// not an error, it surfaces only through the returned outcome.
    pub fn append<I>(&mut self, files: I) -> AppendOutcome
    where
        I: IntoIterator<Item = InputFile>,
    {
        let mut outcome = AppendOutcome::default();

        for file in files {
            let supported = file.is_pdf() || (self.accept_images && file.is_image());
            if supported {
                self.files.push(file);
                outcome.added += 1;
            } else {
                outcome.skipped += 1;
            }
        }

        outcome
    }

    /// Replace the sequence with the permutation described by `order`.
    ///
    /// `order` lists current 0-based indices in their new positions, as a
    /// drag-reorder gesture delivers them.
    ///
    /// # Errors
    ///
    /// Returns an error if `order` is not a bijection over `[0, len)`:
    /// wrong length, out-of-range index, or duplicated index. The registry
    /// is left unchanged on error.
    pub fn reorder(&mut self, order: &[usize]) -> crate::Result<()> {
        if order.len() != self.files.len() {
            return Err(DeckError::invalid_reorder(format!(
                "expected {} indices, got {}",
                self.files.len(),
                order.len()
            )));
        }

        let mut seen = vec![false; self.files.len()];
        for &index in order {
            if index >= self.files.len() {
                return Err(DeckError::invalid_reorder(format!(
                    "index {} out of range for {} file(s)",
                    index,
                    self.files.len()
                )));
            }
            if seen[index] {
                return Err(DeckError::invalid_reorder(format!(
                    "index {index} appears more than once"
                )));
            }
            seen[index] = true;
        }

        self.files = order.iter().map(|&i| self.files[i].clone()).collect();
        Ok(())
    }

    /// Empty the working set.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// The current ordered sequence, by value.
    ///
    /// Operations run against a snapshot so registry mutation during an async
    /// operation cannot change what is being processed mid-flight.
    pub fn snapshot(&self) -> Vec<InputFile> {
        self.files.clone()
    }

    /// The current files, in order.
    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    /// Number of files in the working set.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the working set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
