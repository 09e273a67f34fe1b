//! Integration tests for the split operation.

use std::time::Duration;

use pdfdeck::error::DeckError;
use pdfdeck::ops::{OperationKind, Orchestrator};
use pdfdeck::registry::FileRegistry;
use pdfdeck::sink::MemorySink;

use crate::common::{
    garbage_input, load_artifact, page_count, page_widths, pdf_input, png_input,
};

/// An orchestrator whose batch pause won't slow the test suite down.
fn fast_orchestrator(batch_size: usize) -> Orchestrator {
    Orchestrator::with_batching(batch_size, Duration::from_millis(1))
}

#[tokio::test]
async fn test_split_names_and_contents() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("a.pdf", 3, 100)]);

    let sink = MemorySink::new();
    let report = fast_orchestrator(5)
        .split(&registry.snapshot(), &sink)
        .await
        .unwrap();

    assert_eq!(report.operation, OperationKind::Split);
    assert_eq!(report.files_processed, 1);
    assert_eq!(report.artifacts_emitted, 3);

    assert_eq!(
        sink.filenames(),
        vec!["a_page_1.pdf", "a_page_2.pdf", "a_page_3.pdf"]
    );

    // Each artifact holds exactly the corresponding page of the source
    for (index, artifact) in sink.artifacts().iter().enumerate() {
        let doc = load_artifact(&artifact.bytes);
        assert_eq!(page_count(&doc), 1);
        assert_eq!(page_widths(&doc), vec![100 + index as i64]);
    }
}

#[tokio::test]
async fn test_split_strips_pdf_suffix_case_insensitively() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("Notes.PDF", 1, 100)]);

    let sink = MemorySink::new();
    fast_orchestrator(5)
        .split(&registry.snapshot(), &sink)
        .await
        .unwrap();

    assert_eq!(sink.filenames(), vec!["Notes_page_1.pdf"]);
}

#[tokio::test]
async fn test_split_processes_files_in_order() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("a.pdf", 2, 100), pdf_input("b.pdf", 1, 200)]);

    let sink = MemorySink::new();
    let report = fast_orchestrator(5)
        .split(&registry.snapshot(), &sink)
        .await
        .unwrap();

    assert_eq!(report.files_processed, 2);
    assert_eq!(
        sink.filenames(),
        vec!["a_page_1.pdf", "a_page_2.pdf", "b_page_1.pdf"]
    );
}

#[tokio::test]
async fn test_split_batching_does_not_change_outputs() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("big.pdf", 12, 500)]);

    let sink = MemorySink::new();
    let report = fast_orchestrator(5)
        .split(&registry.snapshot(), &sink)
        .await
        .unwrap();

    // All 12 artifacts, in strictly increasing page order, across batch
    // boundaries at 5 and 10
    assert_eq!(report.artifacts_emitted, 12);
    let expected: Vec<String> = (1..=12).map(|n| format!("big_page_{n}.pdf")).collect();
    assert_eq!(sink.filenames(), expected);

    for (index, artifact) in sink.artifacts().iter().enumerate() {
        let doc = load_artifact(&artifact.bytes);
        assert_eq!(page_widths(&doc), vec![500 + index as i64]);
    }
}

#[tokio::test]
async fn test_split_aborts_on_load_failure_keeping_earlier_artifacts() {
    let mut registry = FileRegistry::new();
    registry.append([
        pdf_input("first.pdf", 2, 100),
        garbage_input("broken.pdf"),
        pdf_input("never.pdf", 3, 200),
    ]);

    let sink = MemorySink::new();
    let result = fast_orchestrator(5).split(&registry.snapshot(), &sink).await;

    match result {
        Err(DeckError::FailedToLoadPdf { name, .. }) => assert_eq!(name, "broken.pdf"),
        other => panic!("expected FailedToLoadPdf, got {other:?}"),
    }

    // Artifacts from the file processed before the failure stay emitted;
    // nothing from the failing or later files
    assert_eq!(sink.filenames(), vec!["first_page_1.pdf", "first_page_2.pdf"]);
}

#[tokio::test]
async fn test_split_skips_non_pdf_entries() {
    let mut registry = FileRegistry::accepting_images();
    registry.append([png_input("scan.png"), pdf_input("a.pdf", 2, 100)]);

    let sink = MemorySink::new();
    let report = fast_orchestrator(5)
        .split(&registry.snapshot(), &sink)
        .await
        .unwrap();

    assert_eq!(report.files_processed, 1);
    assert_eq!(sink.filenames(), vec!["a_page_1.pdf", "a_page_2.pdf"]);
}

#[tokio::test]
async fn test_split_empty_snapshot_rejected() {
    let registry = FileRegistry::new();
    let sink = MemorySink::new();

    let result = fast_orchestrator(5).split(&registry.snapshot(), &sink).await;

    assert!(matches!(result, Err(DeckError::EmptyRegistry)));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_split_with_progress_reports_each_artifact() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("a.pdf", 4, 100)]);

    let sink = MemorySink::new();
    let mut seen = Vec::new();
    fast_orchestrator(2)
        .split_with_progress(&registry.snapshot(), &sink, |count, filename| {
            seen.push((count, filename.to_string()));
        })
        .await
        .unwrap();

    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], (1, "a_page_1.pdf".to_string()));
    assert_eq!(seen[3], (4, "a_page_4.pdf".to_string()));
}
