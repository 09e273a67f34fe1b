//! The rotate operation.

use std::time::Instant;

use crate::codec::{self, pages};
use crate::config::PageNumber;
use crate::error::{DeckError, Result};
use crate::registry::InputFile;
use crate::sink::{Artifact, DownloadSink};
use crate::utils::rotated_filename;

use super::{OperationKind, OperationReport, Orchestrator, require_files};

impl Orchestrator {
    /// Rotate one page, identified by the same 1-based number in every PDF,
    /// by a quarter turn.
    ///
    /// Rotation is cumulative: running the operation again on its own output
    /// advances the page another 90 degrees, wrapping at 360. Outputs are
    /// named `<basename>_rotated.pdf`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::PageOutOfRange`] naming the first file whose page
    /// count is too small. The whole operation aborts there: no artifact is
    /// emitted for that or later files, while earlier files' artifacts stay
    /// emitted.
    pub async fn rotate_page(
        &self,
        files: &[InputFile],
        page: PageNumber,
        sink: &dyn DownloadSink,
    ) -> Result<OperationReport> {
        let _guard = self.begin()?;
        let start = Instant::now();

        require_files(files)?;

        let mut files_processed = 0;

        for file in files {
            if !file.is_pdf() {
                continue;
            }

            let mut loaded = codec::load(file.name(), file.shared_bytes()).await?;
            if page.index() >= loaded.page_count {
                return Err(DeckError::PageOutOfRange {
                    name: file.name().to_string(),
                    page: page.get(),
                    total_pages: loaded.page_count,
                });
            }

            let page_ids = pages::page_ids_in_order(&loaded.document);
            pages::rotate_page_quarter_turn(&mut loaded.document, page_ids[page.index()])?;

            let filename = rotated_filename(file.name());
            let bytes = codec::serialize(loaded.document, &filename).await?;
            sink.emit(Artifact::pdf(bytes, &filename))?;

            files_processed += 1;
        }

        Ok(OperationReport {
            operation: OperationKind::Rotate,
            files_processed,
            pages_processed: files_processed,
            artifacts_emitted: files_processed,
            elapsed: start.elapsed(),
        })
    }
}
