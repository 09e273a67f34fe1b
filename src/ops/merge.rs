//! The merge operation.

use std::time::Instant;

use crate::codec::{self, DocumentBuilder};
use crate::error::{DeckError, Result};
use crate::registry::InputFile;
use crate::sink::{Artifact, DownloadSink};
use crate::utils::MERGED_FILENAME;

use super::{OperationKind, OperationReport, Orchestrator, require_files};

impl Orchestrator {
    /// Merge every file in the snapshot into one output document.
    ///
    /// Files contribute in snapshot order: pages from file *i* always precede
    /// pages from file *i+1*, and within a file the original page order is
    /// preserved. Image files contribute one fixed-size page each.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two files are loaded
    /// - Any file fails to load or embed (the whole merge aborts and nothing
    ///   is emitted)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfdeck::ops::Orchestrator;
    /// # use pdfdeck::registry::InputFile;
    /// # use pdfdeck::sink::MemorySink;
    /// # async fn example(snapshot: Vec<InputFile>) -> Result<(), Box<dyn std::error::Error>> {
    /// let orchestrator = Orchestrator::new();
    /// let sink = MemorySink::new();
    /// let report = orchestrator.merge(&snapshot, &sink).await?;
    /// println!("{} pages merged", report.pages_processed);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(
        &self,
        files: &[InputFile],
        sink: &dyn DownloadSink,
    ) -> Result<OperationReport> {
        let _guard = self.begin()?;
        let start = Instant::now();

        require_files(files)?;
        if files.len() < 2 {
            return Err(DeckError::NotEnoughFilesToMerge { count: files.len() });
        }

        let mut builder = DocumentBuilder::new();
        let mut files_processed = 0;

        for file in files {
            if file.is_pdf() {
                let loaded = codec::load(file.name(), file.shared_bytes()).await?;
                builder.append_document(&loaded)?;
                files_processed += 1;
            } else if file.is_image() {
                builder.append_image_page(file.name(), file.bytes())?;
                files_processed += 1;
            }
        }

        let pages_processed = builder.page_count();
        let document = builder.finish()?;
        let bytes = codec::serialize(document, MERGED_FILENAME).await?;
        sink.emit(Artifact::pdf(bytes, MERGED_FILENAME))?;

        Ok(OperationReport {
            operation: OperationKind::Merge,
            files_processed,
            pages_processed,
            artifacts_emitted: 1,
            elapsed: start.elapsed(),
        })
    }
}
