//! Integration tests for the merge operation.

use pdfdeck::error::DeckError;
use pdfdeck::ops::{OperationKind, Orchestrator};
use pdfdeck::registry::FileRegistry;
use pdfdeck::sink::MemorySink;

use crate::common::{
    garbage_input, load_artifact, page_widths, pdf_input, png_input,
};

#[tokio::test]
async fn test_merge_preserves_file_and_page_order() {
    let mut registry = FileRegistry::new();
    registry.append([
        pdf_input("a.pdf", 2, 100),
        pdf_input("b.pdf", 1, 200),
        pdf_input("c.pdf", 3, 300),
    ]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let report = orchestrator
        .merge(&registry.snapshot(), &sink)
        .await
        .unwrap();

    assert_eq!(report.operation, OperationKind::Merge);
    assert_eq!(report.files_processed, 3);
    assert_eq!(report.pages_processed, 6);
    assert_eq!(report.artifacts_emitted, 1);

    let artifacts = sink.artifacts();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].filename, "merged_document.pdf");
    assert_eq!(artifacts[0].mime_type, "application/pdf");

    // A1, A2, B1, C1, C2, C3
    let merged = load_artifact(&artifacts[0].bytes);
    assert_eq!(page_widths(&merged), vec![100, 101, 200, 300, 301, 302]);
}

#[tokio::test]
async fn test_reorder_changes_page_order_not_content() {
    let mut registry = FileRegistry::new();
    registry.append([
        pdf_input("a.pdf", 2, 100),
        pdf_input("b.pdf", 1, 200),
        pdf_input("c.pdf", 3, 300),
    ]);

    // [A, B, C] -> [C, A, B]
    registry.reorder(&[2, 0, 1]).unwrap();

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    orchestrator
        .merge(&registry.snapshot(), &sink)
        .await
        .unwrap();

    // C1, C2, C3, A1, A2, B1
    let merged = load_artifact(&sink.artifacts()[0].bytes);
    assert_eq!(page_widths(&merged), vec![300, 301, 302, 100, 101, 200]);
}

#[tokio::test]
async fn test_merge_requires_two_files() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("only.pdf", 2, 100)]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let result = orchestrator.merge(&registry.snapshot(), &sink).await;

    assert!(matches!(
        result,
        Err(DeckError::NotEnoughFilesToMerge { count: 1 })
    ));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_merge_empty_snapshot_rejected() {
    let registry = FileRegistry::new();
    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();

    let result = orchestrator.merge(&registry.snapshot(), &sink).await;

    assert!(matches!(result, Err(DeckError::EmptyRegistry)));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_merge_aborts_on_corrupt_file_with_no_output() {
    let mut registry = FileRegistry::new();
    registry.append([
        pdf_input("good.pdf", 2, 100),
        garbage_input("broken.pdf"),
        pdf_input("later.pdf", 1, 200),
    ]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let result = orchestrator.merge(&registry.snapshot(), &sink).await;

    match result {
        Err(DeckError::FailedToLoadPdf { name, .. }) => assert_eq!(name, "broken.pdf"),
        other => panic!("expected FailedToLoadPdf, got {other:?}"),
    }

    // Merge is all-or-nothing: the partial document is discarded
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_merge_embeds_image_as_fixed_square_page() {
    let mut registry = FileRegistry::accepting_images();
    registry.append([
        pdf_input("a.pdf", 1, 100),
        png_input("scan.png"),
        pdf_input("b.pdf", 1, 300),
    ]);

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let report = orchestrator
        .merge(&registry.snapshot(), &sink)
        .await
        .unwrap();

    assert_eq!(report.files_processed, 3);
    assert_eq!(report.pages_processed, 3);

    // The image page keeps its position in the file order
    let merged = load_artifact(&sink.artifacts()[0].bytes);
    assert_eq!(page_widths(&merged), vec![100, 600, 300]);
}

#[tokio::test]
async fn test_merge_snapshot_is_insulated_from_registry_mutation() {
    let mut registry = FileRegistry::new();
    registry.append([pdf_input("a.pdf", 1, 100), pdf_input("b.pdf", 1, 200)]);

    let snapshot = registry.snapshot();
    registry.clear();

    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new();
    let report = orchestrator.merge(&snapshot, &sink).await.unwrap();

    assert_eq!(report.files_processed, 2);
    assert_eq!(sink.len(), 1);
}
