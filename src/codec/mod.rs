//! The boundary to the PDF codec library.
//!
//! Everything that touches `lopdf` lives under this module: parsing input
//! bytes, page-tree manipulation, document assembly, and serialization. The
//! orchestrator above only sees [`LoadedDocument`] values and output byte
//! buffers.
//!
//! Parsing and serialization are CPU-bound, so both run in blocking tasks to
//! keep the async runtime responsive.

pub mod assemble;
pub mod pages;

pub use assemble::DocumentBuilder;

use lopdf::Document;
use std::sync::Arc;
use tokio::task;

use crate::error::{DeckError, Result};

/// A parsed PDF document with intake metadata.
#[derive(Debug)]
pub struct LoadedDocument {
    /// The parsed document.
    pub document: Document,

    /// Registry name of the source file, for error reporting.
    pub name: String,

    /// Number of pages in the document.
    pub page_count: usize,
}

/// Parse a file's bytes into a document.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a valid PDF
/// - The PDF is encrypted
/// - The PDF has no pages
pub async fn load(name: &str, bytes: Arc<[u8]>) -> Result<LoadedDocument> {
    let name = name.to_string();

    task::spawn_blocking(move || {
        let document = Document::load_mem(&bytes).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                DeckError::encrypted_pdf(name.clone())
            } else {
                DeckError::failed_to_load_pdf(name.clone(), err_msg)
            }
        })?;

        if document.trailer.get(b"Encrypt").is_ok() {
            return Err(DeckError::encrypted_pdf(name));
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(DeckError::failed_to_load_pdf(name, "PDF has no pages"));
        }

        Ok(LoadedDocument {
            document,
            name,
            page_count,
        })
    })
    .await
    .map_err(|e| DeckError::other(format!("Load task failed: {e}")))?
}

/// Serialize a document to an output byte buffer.
///
/// Compresses streams before writing, then saves into memory. `name` is the
/// artifact filename, used for error reporting only.
pub async fn serialize(document: Document, name: &str) -> Result<Vec<u8>> {
    let name = name.to_string();

    task::spawn_blocking(move || {
        let mut document = document;
        document.compress();

        let mut buffer = Vec::new();
        document
            .save_to(&mut buffer)
            .map_err(|e| DeckError::serialize_failed(name, e.to_string()))?;

        Ok(buffer)
    })
    .await
    .map_err(|e| DeckError::other(format!("Serialize task failed: {e}")))?
}
