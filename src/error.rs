//! Error types for pdfdeck.
//!
//! This module defines all error types that can occur while managing the file
//! registry and running bulk operations. Errors carry enough context to tell
//! the user which file failed and why.
//!
//! # Error Categories
//!
//! - **User-input errors**: empty working set, too few files, bad page number
//! - **Load errors**: corrupt or encrypted input bytes
//! - **Range errors**: page number beyond a file's page count
//! - **Assembly/output errors**: page-tree manipulation or artifact emission

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for pdfdeck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Main error type for pdfdeck operations.
#[derive(Debug)]
pub enum DeckError {
    /// No files are loaded in the registry.
    EmptyRegistry,

    /// Merge was requested with fewer than two files.
    NotEnoughFilesToMerge {
        /// Number of files currently loaded.
        count: usize,
    },

    /// The supplied page number is not a positive integer.
    InvalidPageNumber {
        /// The raw input that failed to parse.
        input: String,
    },

    /// A reorder sequence is not a permutation of the current registry.
    InvalidReorder {
        /// Details about what's inconsistent.
        details: String,
    },

    /// Another bulk operation is already running on this orchestrator.
    OperationInFlight,

    /// Failed to parse a file's bytes as a PDF.
    FailedToLoadPdf {
        /// Name of the file as it appears in the registry.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// The file is encrypted and cannot be processed.
    EncryptedPdf {
        /// Name of the encrypted file.
        name: String,
    },

    /// An image file could not be decoded for embedding.
    UnsupportedImage {
        /// Name of the image file.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// The requested page does not exist in a file.
    PageOutOfRange {
        /// Name of the offending file.
        name: String,
        /// Requested page number (1-based).
        page: u32,
        /// Total pages in the file.
        total_pages: usize,
    },

    /// Removing the sole page of a single-page file was refused.
    CannotRemoveOnlyPage {
        /// Name of the single-page file.
        name: String,
    },

    /// Page-tree manipulation failed.
    AssembleFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Serializing an output document failed.
    SerializeFailed {
        /// Name of the output that failed to serialize.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// An output file already exists and overwrite is not allowed.
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Writing an artifact to its destination failed.
    EmitFailed {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    Io {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Generic error with a custom message.
    Other {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRegistry => {
                write!(
                    f,
                    "No files loaded. Add PDF files before running an operation"
                )
            }
            Self::NotEnoughFilesToMerge { count } => {
                write!(f, "Need at least 2 files to merge ({count} loaded)")
            }
            Self::InvalidPageNumber { input } => {
                write!(
                    f,
                    "Invalid page number: '{input}'\n  Page numbers are 1-based positive integers"
                )
            }
            Self::InvalidReorder { details } => {
                write!(f, "Invalid reorder sequence: {details}")
            }
            Self::OperationInFlight => {
                write!(f, "Another operation is already running")
            }
            Self::FailedToLoadPdf { name, reason } => {
                write!(f, "Failed to load PDF: {name}\n  Reason: {reason}")
            }
            Self::EncryptedPdf { name } => {
                write!(
                    f,
                    "PDF is encrypted and cannot be processed: {name}\n  \
                     Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools"
                )
            }
            Self::UnsupportedImage { name, reason } => {
                write!(f, "Failed to embed image: {name}\n  Reason: {reason}")
            }
            Self::PageOutOfRange {
                name,
                page,
                total_pages,
            } => {
                write!(
                    f,
                    "Page {page} doesn't exist in {name} (file has {total_pages} page(s))"
                )
            }
            Self::CannotRemoveOnlyPage { name } => {
                write!(f, "Cannot remove the only page of {name}")
            }
            Self::AssembleFailed { reason } => {
                write!(f, "Document assembly failed: {reason}")
            }
            Self::SerializeFailed { name, reason } => {
                write!(f, "Failed to serialize output: {name}\n  Reason: {reason}")
            }
            Self::OutputExists { path } => {
                write!(
                    f,
                    "Output file already exists: {}\n  \
                     Use --force to overwrite or choose a different output directory",
                    path.display()
                )
            }
            Self::EmitFailed { path, source } => {
                write!(
                    f,
                    "Failed to write artifact: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {message}")
            }
            Self::Io { source } => {
                write!(f, "I/O error: {source}")
            }
            Self::Other { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmitFailed { source, .. } => Some(source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for DeckError {
    fn from(err: io::Error) -> Self {
        Self::Io { source: err }
    }
}

impl From<lopdf::Error> for DeckError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl DeckError {
    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(name: impl Into<String>) -> Self {
        Self::EncryptedPdf { name: name.into() }
    }

    /// Create an UnsupportedImage error.
    pub fn unsupported_image(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedImage {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidReorder error.
    pub fn invalid_reorder(details: impl Into<String>) -> Self {
        Self::InvalidReorder {
            details: details.into(),
        }
    }

    /// Create an AssembleFailed error.
    pub fn assemble_failed(reason: impl Into<String>) -> Self {
        Self::AssembleFailed {
            reason: reason.into(),
        }
    }

    /// Create a SerializeFailed error.
    pub fn serialize_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SerializeFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error was caused by user input alone.
    ///
    /// User-input errors are reported before any codec call is made, so no
    /// partial output can exist when one is returned.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyRegistry
                | Self::NotEnoughFilesToMerge { .. }
                | Self::InvalidPageNumber { .. }
                | Self::InvalidReorder { .. }
                | Self::InvalidConfig { .. }
                | Self::OperationInFlight
        )
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyRegistry => 1,
            Self::NotEnoughFilesToMerge { .. } => 1,
            Self::InvalidPageNumber { .. } => 1,
            Self::InvalidReorder { .. } => 1,
            Self::OperationInFlight => 1,
            Self::InvalidConfig { .. } => 1,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::UnsupportedImage { .. } => 3,
            Self::PageOutOfRange { .. } => 4,
            Self::CannotRemoveOnlyPage { .. } => 4,
            Self::AssembleFailed { .. } => 6,
            Self::SerializeFailed { .. } => 6,
            Self::OutputExists { .. } => 5,
            Self::EmitFailed { .. } => 5,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
