//! Artifact emission.
//!
//! Operations hand their outputs to a [`DownloadSink`], the seam where a
//! browser host would trigger a client-side download. [`DirectorySink`]
//! writes artifacts to disk for the CLI; [`MemorySink`] collects them for
//! tests and embedders.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::OverwriteMode;
use crate::error::{DeckError, Result};
use crate::utils::PDF_MIME;

/// One output produced by an operation: a byte buffer plus its filename.
///
/// Artifacts are transient; the system does not retain them after emission.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Serialized document bytes.
    pub bytes: Vec<u8>,

    /// Filename the artifact should be saved under.
    pub filename: String,

    /// MIME type of the artifact.
    pub mime_type: &'static str,
}

impl Artifact {
    /// Create a PDF artifact.
    pub fn pdf(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            mime_type: PDF_MIME,
        }
    }

    /// Size of the artifact in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Destination for operation outputs.
pub trait DownloadSink: Send + Sync {
    /// Deliver one artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be delivered; the running
    /// operation aborts on the first emission failure.
    fn emit(&self, artifact: Artifact) -> Result<()>;
}

/// Sink that collects artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<Artifact>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of all artifacts emitted so far, in emission order.
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.lock().clone()
    }

    /// Filenames of all artifacts emitted so far, in emission order.
    pub fn filenames(&self) -> Vec<String> {
        self.lock().iter().map(|a| a.filename.clone()).collect()
    }

    /// Number of artifacts emitted so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Artifact>> {
        self.artifacts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DownloadSink for MemorySink {
    fn emit(&self, artifact: Artifact) -> Result<()> {
        self.lock().push(artifact);
        Ok(())
    }
}

/// Sink that writes artifacts into a directory.
///
/// Writes go to a temp file first and are renamed into place, so a failed
/// write never leaves a truncated artifact behind.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite_mode: OverwriteMode,
}

impl DirectorySink {
    /// Create a sink writing into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>, overwrite_mode: OverwriteMode) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| DeckError::EmitFailed {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self {
            dir,
            overwrite_mode,
        })
    }

    /// The directory artifacts are written into.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn emit(&self, artifact: Artifact) -> Result<()> {
        let path = self.dir.join(&artifact.filename);

        if self.overwrite_mode == OverwriteMode::NoClobber && path.exists() {
            return Err(DeckError::OutputExists { path });
        }

        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, &artifact.bytes).map_err(|e| DeckError::EmitFailed {
            path: tmp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&tmp_path, &path).map_err(|e| DeckError::EmitFailed {
            path: path.clone(),
            source: e,
        })?;

        Ok(())
    }
}
