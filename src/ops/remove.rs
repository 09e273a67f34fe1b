//! The remove operation.

use std::time::Instant;

use crate::codec::{self, pages};
use crate::config::PageNumber;
use crate::error::{DeckError, Result};
use crate::registry::InputFile;
use crate::sink::{Artifact, DownloadSink};
use crate::utils::removed_filename;

use super::{OperationKind, OperationReport, Orchestrator, require_files};

impl Orchestrator {
    /// Remove one page, identified by the same 1-based number, from every PDF.
    ///
    /// Later pages shift down by one in the output, which is named
    /// `<basename>_removed.pdf`.
    ///
    /// # Errors
    ///
    /// Same abort policy as [`rotate_page`](Self::rotate_page): the first
    /// out-of-range file stops the whole operation. Additionally, a file with
    /// exactly one page refuses removal with
    /// [`DeckError::CannotRemoveOnlyPage`] and aborts the operation the same
    /// way.
    pub async fn remove_page(
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

            let loaded = codec::load(file.name(), file.shared_bytes()).await?;
            if page.index() >= loaded.page_count {
                return Err(DeckError::PageOutOfRange {
                    name: file.name().to_string(),
                    page: page.get(),
                    total_pages: loaded.page_count,
                });
            }
            if loaded.page_count == 1 {
                return Err(DeckError::CannotRemoveOnlyPage {
                    name: file.name().to_string(),
                });
            }

            let page_ids = pages::page_ids_in_order(&loaded.document);
            let keep: Vec<_> = page_ids
                .iter()
                .copied()
                .enumerate()
                .filter(|(index, _)| *index != page.index())
                .map(|(_, id)| id)
                .collect();
            let trimmed = pages::document_with_pages(&loaded.document, &keep)?;

            let filename = removed_filename(file.name());
            let bytes = codec::serialize(trimmed, &filename).await?;
            sink.emit(Artifact::pdf(bytes, &filename))?;

            files_processed += 1;
        }

        Ok(OperationReport {
            operation: OperationKind::Remove,
            files_processed,
            pages_processed: files_processed,
            artifacts_emitted: files_processed,
            elapsed: start.elapsed(),
        })
    }
}
