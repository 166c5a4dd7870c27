//! pdfops - merge, reorder and split PDF files.
//!
//! This library holds every operation behind the `pdfops` command:
//!
//! - Concatenating files, optionally stripping leading pages of each
//! - Restoring the reading order of duplex scans ([`sequence::book_order`])
//! - Splitting a file into chapters listed in a CSV file
//! - Named error kinds with process exit codes
//!
//! # Examples
//!
//! ## Reorder a scan
//!
//! ```no_run
//! use pdfops::config::ReorderConfig;
//! use pdfops::ops::reorder::reorder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReorderConfig::new("scan.pdf", "book.pdf");
//! let report = reorder(&config).await?;
//! println!("Reordered {} pages", report.page_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdfops::config::OverwriteMode;
//! use pdfops::io::{PdfReader, PdfWriter};
//! use pdfops::pages::PageEditor;
//! use pdfops::sequence::PageSequence;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("input.pdf")).await?;
//!
//! // Keep pages 2 to 4
//! let pages = PageSequence::identity(loaded.page_count).slice(2, 4)?;
//! let excerpt = PageEditor::new().select(&loaded.document, &pages)?;
//!
//! PdfWriter::new()
//!     .save(&excerpt, Path::new("excerpt.pdf"), OverwriteMode::NoClobber)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chapters;
pub mod config;
pub mod error;
pub mod io;
pub mod ops;
pub mod output;
pub mod pages;
pub mod sequence;
pub mod utils;

// Re-export commonly used types
pub use config::{MergeConfig, ReorderConfig, SplitConfig};
pub use error::{ErrorKind, PdfOpsError, Result};
pub use sequence::{PageSequence, book_order};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Synthetic documents for unit tests.
///
/// Every page carries its zero-based source position under [`TAG_KEY`], so
/// tests can read back which source page ended up where.
#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::{Document, Object, ObjectId, dictionary};
    use std::path::{Path, PathBuf};

    pub const TAG_KEY: &str = "PdfOpsTag";

    fn tagged_page(parent: ObjectId, tag: usize) -> lopdf::Dictionary {
        dictionary! {
            "Type" => "Page",
            "Parent" => parent,
            TAG_KEY => tag as i64,
        }
    }

    fn finish(doc: &mut Document, pages_id: ObjectId, pages: lopdf::Dictionary) {
        doc.objects.insert(pages_id, pages.into());
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
    }

    /// A flat document of `n` tagged pages.
    pub fn numbered_document(n: usize) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = (0..n)
            .map(|tag| {
                let mut page = tagged_page(pages_id, tag);
                page.set(
                    "MediaBox",
                    vec![0.into(), 0.into(), 612.into(), 792.into()],
                );
                doc.add_object(page).into()
            })
            .collect();

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => n as i64,
        };
        finish(&mut doc, pages_id, pages);
        doc
    }

    /// A document of `n` tagged pages under two intermediate nodes. Pages
    /// inherit `MediaBox` from the root and `Resources` from their node.
    pub fn nested_document(n: usize) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let split = n / 2;
        let mut nodes = Vec::new();
        for range in [0..split, split..n] {
            let node_id = doc.new_object_id();
            let kids: Vec<Object> = range
                .clone()
                .map(|tag| doc.add_object(tagged_page(node_id, tag)).into())
                .collect();

            let node = dictionary! {
                "Type" => "Pages",
                "Parent" => pages_id,
                "Kids" => kids,
                "Count" => range.len() as i64,
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            };
            doc.objects.insert(node_id, node.into());
            nodes.push(Object::Reference(node_id));
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => nodes,
            "Count" => n as i64,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        finish(&mut doc, pages_id, pages);
        doc
    }

    /// Tags of the pages of `doc`, in page order.
    pub fn page_tags(doc: &Document) -> Vec<usize> {
        doc.get_pages()
            .into_values()
            .map(|page_id| {
                let page = doc.get_dictionary(page_id).unwrap();
                page.get(TAG_KEY.as_bytes()).unwrap().as_i64().unwrap() as usize
            })
            .collect()
    }

    /// Save a flat document of `n` tagged pages as `dir/name`.
    pub fn write_numbered_pdf(dir: &Path, name: &str, n: usize) -> PathBuf {
        let path = dir.join(name);
        numbered_document(n).save(&path).unwrap();
        path
    }

    pub fn read_document(path: &Path) -> Document {
        Document::load(path).unwrap()
    }
}
