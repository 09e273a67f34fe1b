//! Integration tests for the rotate and remove operations.

use pdfdeck::codec::pages::{page_ids_in_order, page_rotation};
use pdfdeck::config::PageNumber;
use pdfdeck::error::DeckError;
use pdfdeck::ops::Orchestrator;
use pdfdeck::registry::{FileRegistry, InputFile};
use pdfdeck::sink::MemorySink;
use rstest::rstest;

use crate::common::{PDF_MIME, load_artifact, page_count, page_widths, pdf_input};

fn page(number: u32) -> PageNumber {
    PageNumber::new(number).unwrap()
}

#[tokio::test]
async fn test_rotate_emits_one_artifact_per_file() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("a.pdf", 3, 100), pdf_input("b.pdf", 2, 200)]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let report = orchestrator
        .rotate_page(&registry.snapshot(), page(2), &sink)
        .await
        .unwrap();

    assert_eq!(report.files_processed, 2);
    assert_eq!(report.artifacts_emitted, 2);
    assert_eq!(sink.filenames(), vec!["a_rotated.pdf", "b_rotated.pdf"]);

    // Only the targeted page is rotated, in every file
    for artifact in sink.artifacts() {
        let doc = load_artifact(&artifact.bytes);
        let ids = page_ids_in_order(&doc);
        assert_eq!(page_rotation(&doc, ids[0]), 0);
        assert_eq!(page_rotation(&doc, ids[1]), 90);
    }
}

#[tokio::test]
async fn test_rotate_twice_accumulates_180_degrees() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("a.pdf", 3, 100)]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    orchestrator
        .rotate_page(&registry.snapshot(), page(2), &sink)
        .await
        .unwrap();

    // Feed the rotated output back in and rotate the same page again
    let first_pass = sink.artifacts().remove(0);
    let mut registry = FileRegistry::new();
    registry.append([InputFile::new(
        first_pass.filename.clone(),
        PDF_MIME,
        first_pass.bytes.clone(),
    )]);

    let sink = MemorySink::new();
    orchestrator
        .rotate_page(&registry.snapshot(), page(2), &sink)
        .await
        .unwrap();

    let doc = load_artifact(&sink.artifacts()[0].bytes);
    let ids = page_ids_in_order(&doc);
    assert_eq!(page_rotation(&doc, ids[1]), 180); // Cumulative, not reset
}

#[rstest]
#[case(4)]
#[case(9)]
#[tokio::test]
async fn test_rotate_out_of_range_everywhere_emits_nothing(#[case] page_number: u32) {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("first.pdf", 2, 100), pdf_input("second.pdf", 3, 200)]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let result = orchestrator
        .rotate_page(&registry.snapshot(), page(page_number), &sink)
        .await;

    // The first offending file is reported and nothing at all is emitted
    match result {
        Err(DeckError::PageOutOfRange {
            name, total_pages, ..
        }) => {
            assert_eq!(name, "first.pdf");
            assert_eq!(total_pages, 2);
        }
        other => panic!("expected PageOutOfRange, got {other:?}"),
    }
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_rotate_aborts_mid_run_keeping_earlier_artifacts() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("big.pdf", 3, 100), pdf_input("small.pdf", 1, 200)]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let result = orchestrator
        .rotate_page(&registry.snapshot(), page(2), &sink)
        .await;

    match result {
        Err(DeckError::PageOutOfRange { name, .. }) => assert_eq!(name, "small.pdf"),
        other => panic!("expected PageOutOfRange, got {other:?}"),
    }

    // The file before the failure was already processed and emitted
    assert_eq!(sink.filenames(), vec!["big_rotated.pdf"]);
}

#[tokio::test]
async fn test_remove_shifts_later_pages_down() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("a.pdf", 3, 100)]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let report = orchestrator
        .remove_page(&registry.snapshot(), page(2), &sink)
        .await
        .unwrap();

    assert_eq!(report.artifacts_emitted, 1);
    assert_eq!(sink.filenames(), vec!["a_removed.pdf"]);

    let doc = load_artifact(&sink.artifacts()[0].bytes);
    assert_eq!(page_count(&doc), 2);
    assert_eq!(page_widths(&doc), vec![100, 102]); // Page 2 gone, page 3 shifted
}

#[tokio::test]
async fn test_remove_refuses_only_page() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("single.pdf", 1, 100)]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let result = orchestrator
        .remove_page(&registry.snapshot(), page(1), &sink)
        .await;

    match result {
        Err(DeckError::CannotRemoveOnlyPage { name }) => assert_eq!(name, "single.pdf"),
        other => panic!("expected CannotRemoveOnlyPage, got {other:?}"),
    }
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_remove_only_page_aborts_whole_operation() {
    let mut registry = FileRegistry::new();
    registry.append([
        pdf_input("multi.pdf", 3, 100),
        pdf_input("single.pdf", 1, 200),
        pdf_input("never.pdf", 3, 300),
    ]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let result = orchestrator
        .remove_page(&registry.snapshot(), page(1), &sink)
        .await;

    assert!(matches!(
        result,
        Err(DeckError::CannotRemoveOnlyPage { .. })
    ));

    // Only the file before the refusal was emitted
    assert_eq!(sink.filenames(), vec!["multi_removed.pdf"]);
}

#[tokio::test]
async fn test_remove_out_of_range_aborts() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("a.pdf", 2, 100)]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let result = orchestrator
        .remove_page(&registry.snapshot(), page(5), &sink)
        .await;

    match result {
        Err(DeckError::PageOutOfRange {
            name,
            page,
            total_pages,
        }) => {
            assert_eq!(name, "a.pdf");
            assert_eq!(page, 5);
            assert_eq!(total_pages, 2);
        }
        other => panic!("expected PageOutOfRange, got {other:?}"),
    }
    assert!(sink.is_empty());
}
