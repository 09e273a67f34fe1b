//! The split operation.

use std::time::Instant;

use crate::codec::{self, pages};
use crate::error::Result;
use crate::registry::InputFile;
use crate::sink::{Artifact, DownloadSink};
use crate::utils::split_page_filename;

use super::{OperationKind, OperationReport, Orchestrator, require_files};

impl Orchestrator {
    /// Write every page of every PDF in the snapshot as its own document.
    ///
    /// Outputs are named `<basename>_page_<n>.pdf` with a 1-based page number.
    /// Non-PDF entries are skipped. A load failure on any file aborts the
    /// whole operation; artifacts already emitted stay emitted.
    pub async fn split(
        &self,
        files: &[InputFile],
        sink: &dyn DownloadSink,
    ) -> Result<OperationReport> {
        self.split_with_progress(files, sink, |_, _| {}).await
    }

    /// [`split`](Self::split), reporting each emitted artifact to a callback.
    ///
    /// The callback receives the running artifact count and the filename just
    /// emitted.
    pub async fn split_with_progress<F>(
        &self,
        files: &[InputFile],
        sink: &dyn DownloadSink,
        mut on_artifact: F,
    ) -> Result<OperationReport>
    where
        F: FnMut(usize, &str),
    {
        let _guard = self.begin()?;
        let start = Instant::now();

        require_files(files)?;

        let mut files_processed = 0;
        let mut artifacts_emitted = 0;

        for file in files {
            if !file.is_pdf() {
                continue;
            }

            let loaded = codec::load(file.name(), file.shared_bytes()).await?;
            let page_ids = pages::page_ids_in_order(&loaded.document);

            for (index, &page_id) in page_ids.iter().enumerate() {
                let single = pages::document_with_pages(&loaded.document, &[page_id])?;
                let filename = split_page_filename(file.name(), index + 1);
                let bytes = codec::serialize(single, &filename).await?;
                sink.emit(Artifact::pdf(bytes, &filename))?;

                artifacts_emitted += 1;
                on_artifact(artifacts_emitted, &filename);

                // Yield between batches so the host event loop stays
                // responsive during large splits. Scheduling only: batch
                // boundaries never change output content, naming, or order.
                let done = index + 1;
                if done % self.batch_size == 0 && done < page_ids.len() {
                    tokio::time::sleep(self.batch_delay).await;
                }
            }

            files_processed += 1;
        }

        Ok(OperationReport {
            operation: OperationKind::Split,
            files_processed,
            pages_processed: artifacts_emitted,
            artifacts_emitted,
            elapsed: start.elapsed(),
        })
    }
}
