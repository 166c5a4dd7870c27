//! PDF loading.
//!
//! [`PdfReader`] is the page source of every operation: it checks that the
//! path exists and is a file, parses it with `lopdf` on the blocking pool and
//! maps failures to named error kinds.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfOpsError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration, file_size: u64) -> Self {
        let page_count = document.get_pages().len();

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// PDF reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Check that `path` exists and is a regular file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::FileNotFound`] or [`PdfOpsError::NotAFile`].
    pub async fn check_path_exists(path: &Path) -> Result<u64> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfOpsError::file_not_found(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };

        if !metadata.is_file() {
            return Err(PdfOpsError::not_a_file(path.to_path_buf()));
        }

        Ok(metadata.len())
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or is a directory
    /// - The file is not a valid PDF
    /// - The PDF is encrypted
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::io::PdfReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load(Path::new("document.pdf")).await?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let file_size = Self::check_path_exists(path).await?;

        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let doc = {
            let path_buf = path_buf.clone();
            task::spawn_blocking(move || Document::load(&path_buf))
                .await
                .map_err(|e| PdfOpsError::other(format!("Load task failed: {e}")))?
        }
        .map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfOpsError::encrypted_pdf(path_buf.clone())
            } else {
                PdfOpsError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        let loaded = LoadedPdf::new(doc, path_buf, start.elapsed(), file_size);

        tracing::debug!(
            path = %loaded.path.display(),
            pages = loaded.page_count,
            elapsed = ?loaded.load_time,
            "loaded document"
        );

        Ok(loaded)
    }

    /// Load documents one after another, in the order given.
    ///
    /// Stops at the first failure.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Result<Vec<LoadedPdf>> {
        use futures::stream::{self, StreamExt, TryStreamExt};

        stream::iter(paths)
            .then(|path| self.load(path))
            .try_collect()
            .await
    }
}
