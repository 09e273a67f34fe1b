//! Shared helpers for integration tests.
//!
//! Fixtures are built in memory rather than checked in: each page of a
//! generated PDF gets a distinct MediaBox width, so tests can identify pages
//! after they move between documents.

use lopdf::{Document, Object, dictionary};
use pdfdeck::codec::pages::page_ids_in_order;
use pdfdeck::registry::InputFile;

/// MIME type of PDF inputs.
pub const PDF_MIME: &str = "application/pdf";

/// Build a document with `pages` pages; page `i` (0-based) gets MediaBox
/// width `base_width + i`.
pub fn pdf_document(pages: usize, base_width: i64) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let mut page_ids = Vec::new();
    for i in 0..pages {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (base_width + i as i64).into(),
                792.into(),
            ],
        };
        page_ids.push(doc.add_object(Object::Dictionary(page)));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<Object>>(),
        "Count" => pages as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Object::Dictionary(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    }));
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Serialized bytes of a generated PDF.
pub fn pdf_bytes(pages: usize, base_width: i64) -> Vec<u8> {
    let mut doc = pdf_document(pages, base_width);
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("fixture should serialize");
    buffer
}

/// A registry entry holding a generated PDF.
pub fn pdf_input(name: &str, pages: usize, base_width: i64) -> InputFile {
    InputFile::new(name, PDF_MIME, pdf_bytes(pages, base_width))
}

/// A registry entry claiming to be a PDF but holding garbage bytes.
pub fn garbage_input(name: &str) -> InputFile {
    InputFile::new(name, PDF_MIME, b"%PDF-not a real document".to_vec())
}

/// A registry entry holding a small generated PNG.
pub fn png_input(name: &str) -> InputFile {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([10, 120, 200]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .expect("fixture PNG should encode");
    InputFile::new(name, "image/png", buffer.into_inner())
}

/// Parse an emitted artifact back into a document.
pub fn load_artifact(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("artifact should be a valid PDF")
}

/// MediaBox widths of every page, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    page_ids_in_order(doc)
        .into_iter()
        .map(|page_id| {
            let dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
            let media_box = dict.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// Number of pages in a document.
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}
