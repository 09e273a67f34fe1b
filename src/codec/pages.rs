//! Page-level operations on parsed documents.
//!
//! This module handles page-tree manipulation:
//! - Page lookup in page order
//! - Building a document from a subset of pages (split, remove)
//! - Cumulative quarter-turn rotation

use lopdf::{Document, Object, ObjectId};

use crate::error::{DeckError, Result};

/// Page object ids in page order (first page first).
pub fn page_ids_in_order(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Build a new document containing exactly the pages in `keep`, in that order.
///
/// The source is untouched; the result's root page tree references only the
/// kept pages, and everything unreachable is pruned. Used by split (one page
/// per output) and remove (every page but one).
///
/// # Errors
///
/// Returns an error if `keep` is empty or the source's page tree cannot be
/// rewritten.
pub fn document_with_pages(src: &Document, keep: &[ObjectId]) -> Result<Document> {
    if keep.is_empty() {
        return Err(DeckError::assemble_failed("no pages selected"));
    }

    let mut doc = src.clone();

    let pages_id = {
        let catalog = doc
            .catalog_mut()
            .map_err(|e| DeckError::assemble_failed(format!("Failed to get catalog: {e}")))?;
        catalog
            .get(b"Pages")
            .and_then(|p| p.as_reference())
            .map_err(|e| {
                DeckError::assemble_failed(format!("Failed to get pages reference: {e}"))
            })?
    };

    let pages_obj = doc
        .get_object_mut(pages_id)
        .map_err(|e| DeckError::assemble_failed(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_obj {
        let kids: Vec<Object> = keep.iter().map(|&id| Object::Reference(id)).collect();
        dict.set("Kids", Object::Array(kids));
        dict.set("Count", Object::Integer(keep.len() as i64));
    } else {
        return Err(DeckError::assemble_failed(
            "Pages object is not a dictionary",
        ));
    }

    // Kept pages may have lived under an intermediate tree node that is gone
    // after the Kids rewrite.
    for &page_id in keep {
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    doc.prune_objects();
    doc.renumber_objects();

    Ok(doc)
}

/// Advance a page's rotation by 90 degrees, wrapping at 360.
///
/// Rotation is cumulative: repeated invocations keep advancing the stored
/// `/Rotate` value. Returns the new rotation in degrees.
pub fn rotate_page_quarter_turn(doc: &mut Document, page_id: ObjectId) -> Result<i64> {
    let page_obj = doc
        .get_object_mut(page_id)
        .map_err(|e| DeckError::assemble_failed(format!("Failed to get page: {e}")))?;

    if let Object::Dictionary(dict) = page_obj {
        let current = dict.get(b"Rotate").and_then(|r| r.as_i64()).unwrap_or(0);
        let next = (current + 90) % 360;
        dict.set("Rotate", Object::Integer(next));
        Ok(next)
    } else {
        Err(DeckError::assemble_failed("Page object is not a dictionary"))
    }
}

/// Read a page's stored rotation in degrees (0 if unset).
pub fn page_rotation(doc: &Document, page_id: ObjectId) -> i64 {
    doc.get_object(page_id)
        .ok()
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|dict| dict.get(b"Rotate").and_then(|r| r.as_i64()).ok())
        .unwrap_or(0)
}
