//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Overwrite protection
//! - Atomic writes (write to temp file, then rename)
//! - Compression levels
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::config::OverwriteMode;
//! use pdfops::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(&doc, Path::new("output.pdf"), OverwriteMode::NoClobber).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::{CompressionLevel, OverwriteMode};
use crate::error::{PdfOpsError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compression applied before writing.
    pub compression: CompressionLevel,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::Standard,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Number of pages in the written document.
    pub page_count: usize,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer using the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self {
            options: WriteOptions {
                compression,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output exists and `overwrite` is [`OverwriteMode::NoClobber`]
    /// - The output directory doesn't exist
    /// - The write operation fails
    pub async fn save(&self, doc: &Document, path: &Path, overwrite: OverwriteMode) -> Result<()> {
        let _stats = self.save_with_stats(doc, path, overwrite).await?;
        Ok(())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Errors
    ///
    /// Same as [`PdfWriter::save`].
    pub async fn save_with_stats(
        &self,
        doc: &Document,
        path: &Path,
        overwrite: OverwriteMode,
    ) -> Result<WriteStatistics> {
        self.check_target(path, overwrite).await?;

        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        // The document is consumed by compression and renumbering.
        let mut doc_clone = doc.clone();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            match options.compression {
                CompressionLevel::None => {}
                CompressionLevel::Standard => {
                    doc_clone.compress();
                }
                CompressionLevel::Maximum => {
                    doc_clone.prune_objects();
                    doc_clone.compress();
                }
            }
            doc_clone.renumber_objects();

            let page_count = doc_clone.get_pages().len();

            let write_path = if options.atomic {
                temp_path_for(&path_buf)
            } else {
                path_buf.clone()
            };

            let result = write_document(&mut doc_clone, &write_path, options.buffer_size)
                .and_then(|()| {
                    if options.atomic {
                        std::fs::rename(&write_path, &path_buf).map_err(|e| {
                            PdfOpsError::FailedToWrite {
                                path: path_buf.clone(),
                                source: e,
                            }
                        })
                    } else {
                        Ok(())
                    }
                });

            if let Err(err) = result {
                if options.atomic {
                    let _ = std::fs::remove_file(&write_path);
                }
                return Err(err);
            }

            let write_time = start.elapsed();
            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, PdfOpsError>(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
                page_count,
                compressed: options.compression != CompressionLevel::None,
            })
        })
        .await
        .map_err(|e| PdfOpsError::other(format!("Write task failed: {e}")))??;

        tracing::debug!(
            path = %stats.output_path.display(),
            pages = stats.page_count,
            bytes = stats.file_size,
            "wrote document"
        );

        Ok(stats)
    }

    /// Check that a document may be written to `path`.
    ///
    /// Performs pre-flight checks without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path exists and `overwrite` forbids replacing it
    /// - The path exists and is a directory
    /// - The parent directory doesn't exist
    pub async fn check_target(&self, path: &Path, overwrite: OverwriteMode) -> Result<()> {
        if let Ok(metadata) = tokio::fs::metadata(path).await {
            if metadata.is_dir() {
                return Err(PdfOpsError::not_a_file(path.to_path_buf()));
            }
            if overwrite == OverwriteMode::NoClobber {
                return Err(PdfOpsError::output_exists(path.to_path_buf()));
            }
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let is_dir = tokio::fs::metadata(parent)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);

            if !is_dir {
                return Err(PdfOpsError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }
}

fn write_document(doc: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| PdfOpsError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

    doc.save_to(&mut writer)
        .map_err(|e| PdfOpsError::FailedToWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;

    writer.flush().map_err(|e| PdfOpsError::FailedToWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Sibling temp file, so the final rename never crosses filesystems.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".pdfops.tmp");
    path.with_file_name(name)
}
