//! Output document assembly for merge.
//!
//! [`DocumentBuilder`] collects pages from many sources into one output
//! document: whole PDFs appended in order, and images embedded one per page.
//! Sources are renumbered past the builder's id space before their objects
//! move in, so references never collide.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary, xobject};

use crate::codec::LoadedDocument;
use crate::error::{DeckError, Result};

/// Side length of the fixed square page an embedded image is drawn onto.
///
/// Images are stretched to fill the page; aspect ratio is not preserved.
pub const IMAGE_PAGE_SIZE: i64 = 600;

/// Incrementally assembles the merge output document.
pub struct DocumentBuilder {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl DocumentBuilder {
    /// Create a builder holding an empty output document.
    pub fn new() -> Self {
        Self {
            document: Document::with_version("1.5"),
            page_ids: Vec::new(),
        }
    }

    /// Number of pages collected so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append every page of a loaded document, in its original order.
    ///
    /// Pages land after all previously appended pages. Returns the number of
    /// pages appended.
    pub fn append_document(&mut self, source: &LoadedDocument) -> Result<usize> {
        let mut src = source.document.clone();

        src.renumber_objects_with(self.document.max_id + 1);
        self.document.max_id = src.max_id;

        let pages: Vec<ObjectId> = src.get_pages().into_values().collect();
        self.document.objects.extend(src.objects);
        self.page_ids.extend(pages.iter().copied());

        Ok(pages.len())
    }

    /// Append one page holding an embedded image drawn to fill the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded as a supported image.
    pub fn append_image_page(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let image = xobject::image_from(bytes.to_vec())
            .map_err(|e| DeckError::unsupported_image(name, e.to_string()))?;
        let image_id = self.document.add_object(image);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        IMAGE_PAGE_SIZE.into(),
                        0.into(),
                        0.into(),
                        IMAGE_PAGE_SIZE.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content.encode().map_err(|e| {
            DeckError::assemble_failed(format!("Failed to encode page content: {e}"))
        })?;
        let content_id = self.document.add_object(Stream::new(dictionary! {}, encoded));

        let page = dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![
                0.into(),
                0.into(),
                IMAGE_PAGE_SIZE.into(),
                IMAGE_PAGE_SIZE.into(),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
        };
        let page_id = self.document.add_object(Object::Dictionary(page));
        self.page_ids.push(page_id);

        Ok(())
    }

    /// Wire up the page tree and catalog and return the finished document.
    ///
    /// # Errors
    ///
    /// Returns an error if no pages were collected.
    pub fn finish(mut self) -> Result<Document> {
        if self.page_ids.is_empty() {
            return Err(DeckError::assemble_failed("no pages to assemble"));
        }

        let pages_id = self.document.new_object_id();
        for &page_id in &self.page_ids {
            if let Ok(Object::Dictionary(dict)) = self.document.get_object_mut(page_id) {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = self.document.add_object(Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }));
        self.document.trailer.set("Root", catalog_id);

        // Source catalogs and page-tree nodes came along with the object maps;
        // they are unreachable from the new root.
        self.document.prune_objects();
        self.document.renumber_objects();

        Ok(self.document)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
