//! Shared helpers for integration tests.
//!
//! Documents are generated on the fly: every page carries its zero-based
//! position in the generated file under [`TAG_KEY`], so a test can tell which
//! source page ended up where.

#![allow(dead_code)]

use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TAG_KEY: &str = "PdfOpsTag";

/// Write a flat `n`-page document to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, n: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..n)
        .map(|tag| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                TAG_KEY => tag as i64,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => n as i64,
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("Failed to write test PDF");
    path
}

/// Page tags of the PDF at `path`, in page order.
pub fn page_tags(path: &Path) -> Vec<usize> {
    let doc = Document::load(path).expect("Failed to load output PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            doc.get_dictionary(page_id)
                .and_then(|page| page.get(TAG_KEY.as_bytes()))
                .and_then(Object::as_i64)
                .expect("Page without tag") as usize
        })
        .collect()
}

/// Write a chapter list to `dir/chapters.csv`.
pub fn write_chapters(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("chapters.csv");
    std::fs::write(&path, text).expect("Failed to write chapter list");
    path
}

/// Scratch directory removed when dropped.
pub fn scratch_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Path as a command-line argument.
pub fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
