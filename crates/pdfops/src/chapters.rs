//! Chapter lists for the split operation.
//!
//! A chapter list is a CSV file with a header row and the columns
//! `name,start,end`. Page numbers are 1-based and inclusive. Extra columns
//! are ignored and surrounding whitespace is trimmed.
//!
//! ```text
//! name,start,end
//! intro.pdf,1,3
//! body.pdf,4,10
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path};

use crate::error::{PdfOpsError, Result};
use crate::sequence::PageSequence;

/// A named, contiguous, 1-based inclusive page range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Output file name, relative to the output directory.
    pub name: String,

    /// First page (1-based).
    pub start: u32,

    /// Last page (1-based, inclusive).
    #[serde(rename = "end")]
    pub stop: u32,
}

impl Chapter {
    /// Create a chapter.
    pub fn new(name: impl Into<String>, start: u32, stop: u32) -> Self {
        Self {
            name: name.into(),
            start,
            stop,
        }
    }

    /// Number of pages covered, zero for an inverted range.
    pub fn page_count(&self) -> usize {
        if self.start > self.stop {
            0
        } else {
            (self.stop - self.start + 1) as usize
        }
    }

    /// Page sequence this chapter selects from a document of `total_pages`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InvalidPageRange`] unless
    /// `1 <= start <= stop <= total_pages`.
    pub fn pages(&self, total_pages: usize) -> Result<PageSequence> {
        PageSequence::identity(total_pages).slice(self.start, self.stop)
    }
}

/// Parse a chapter list from CSV text.
///
/// `source` is only used in error messages.
///
/// # Errors
///
/// Returns [`PdfOpsError::InvalidChapterList`] with the offending line number
/// when a row is missing a column, has a non-numeric page, has `start > end`
/// or `start == 0`, has an unusable name, or repeats an earlier name.
pub fn parse_chapters<R: std::io::Read>(reader: R, source: &Path) -> Result<Vec<Chapter>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| {
            PdfOpsError::invalid_chapter_list(source.to_path_buf(), 1, csv_error_details(&err))
        })?
        .clone();

    let mut chapters: Vec<Chapter> = Vec::new();
    let mut names = HashSet::new();

    for record in csv_reader.records() {
        let record = record.map_err(|err| {
            let line = err.position().map(|p| p.line()).unwrap_or(0);
            PdfOpsError::invalid_chapter_list(source.to_path_buf(), line, csv_error_details(&err))
        })?;

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let invalid = |details: String| {
            PdfOpsError::invalid_chapter_list(source.to_path_buf(), line, details)
        };

        let chapter: Chapter = record
            .deserialize(Some(&headers))
            .map_err(|err| invalid(csv_error_details(&err)))?;

        validate_name(&chapter.name).map_err(invalid)?;

        if chapter.start == 0 {
            return Err(invalid("Page numbers must be positive (1-indexed)".into()));
        }

        if chapter.start > chapter.stop {
            return Err(invalid(format!(
                "Start page {} is after end page {}",
                chapter.start, chapter.stop
            )));
        }

        if !names.insert(chapter.name.clone()) {
            return Err(invalid(format!("Duplicate chapter name: {}", chapter.name)));
        }

        chapters.push(chapter);
    }

    tracing::debug!(count = chapters.len(), source = %source.display(), "parsed chapter list");

    Ok(chapters)
}

/// Read and parse a chapter list file.
///
/// # Errors
///
/// Returns [`PdfOpsError::FileNotFound`] if the file does not exist,
/// [`PdfOpsError::FailedToReadChapterList`] if it cannot be read, and the
/// errors of [`parse_chapters`] for malformed content.
pub async fn load_chapters(path: &Path) -> Result<Vec<Chapter>> {
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            PdfOpsError::file_not_found(path.to_path_buf())
        } else {
            PdfOpsError::FailedToReadChapterList {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })?;

    parse_chapters(bytes.as_slice(), path)
}

/// Check every chapter against the page count of the source document.
///
/// # Errors
///
/// Returns the first [`PdfOpsError::InvalidPageRange`] encountered.
pub fn validate_chapters(chapters: &[Chapter], total_pages: usize) -> Result<()> {
    for chapter in chapters {
        chapter.pages(total_pages)?;
    }
    Ok(())
}

/// Names become file names inside the output directory: they must be a single
/// normal path component.
fn validate_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Chapter name is empty".into());
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(format!(
            "Chapter name must be a plain file name, got: {name}"
        )),
    }
}

fn csv_error_details(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("column {}: {}", field + 1, err),
            None => err.to_string(),
        },
        _ => err.to_string(),
    }
}
