//! Restoring the page order of a duplex scan.
//!
//! A stack scanned fronts first and then backs in reverse yields
//! `front₁ … frontₖ backₖ … back₁`. [`book_order`] interleaves that back into
//! reading order; with `undo` the inverse permutation is applied instead.

use serde::Serialize;
use std::path::PathBuf;

use crate::config::ReorderConfig;
use crate::error::Result;
use crate::io::{PdfReader, PdfWriter, WriteStatistics};
use crate::output::OutputFormatter;
use crate::pages::PageEditor;
use crate::sequence::{PageSequence, book_order};

/// Summary of a reorder.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderReport {
    /// Input file path.
    pub input: PathBuf,

    /// Output file path.
    pub output: PathBuf,

    /// Pages in the document.
    pub page_count: usize,

    /// The inverse transform was applied.
    pub undo: bool,

    /// Output page `i` is input page `order[i]` (zero-based).
    pub order: PageSequence,

    /// Nothing was written.
    pub dry_run: bool,

    /// Write statistics, absent on a dry run.
    pub write: Option<WriteStatistics>,
}

/// Reorders the pages of one file.
#[derive(Debug, Clone, Default)]
pub struct Reorderer {
    reader: PdfReader,
    editor: PageEditor,
    formatter: OutputFormatter,
}

impl Reorderer {
    /// Create a reorderer reporting through `formatter`.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            reader: PdfReader::new(),
            editor: PageEditor::new(),
            formatter,
        }
    }

    /// Run the reorder described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input does not exist or is not a valid PDF
    /// - The output exists and overwriting is not forced
    /// - The page count is odd (nothing is written)
    /// - Writing fails
    pub async fn reorder(&self, config: &ReorderConfig) -> Result<ReorderReport> {
        config.validate()?;

        PdfReader::check_path_exists(&config.input).await?;

        let writer = PdfWriter::with_compression(config.options.compression);
        writer
            .check_target(&config.output, config.options.overwrite_mode)
            .await?;

        let loaded = self.reader.load(&config.input).await?;

        let order = book_order(loaded.page_count)?;
        let order = if config.undo { order.inverse()? } else { order };

        self.formatter.info(&format!(
            "Reordering {} page(s) of {}",
            loaded.page_count,
            loaded.display_name()
        ));
        if self.formatter.is_verbose() {
            let pages: Vec<String> = order.iter().map(|index| (index + 1).to_string()).collect();
            self.formatter.detail("Page order", &pages.join(" "));
        }

        let mut report = ReorderReport {
            input: config.input.clone(),
            output: config.output.clone(),
            page_count: loaded.page_count,
            undo: config.undo,
            order,
            dry_run: config.options.dry_run,
            write: None,
        };

        if config.options.dry_run {
            return Ok(report);
        }

        let document = self.editor.select(&loaded.document, &report.order)?;
        let stats = writer
            .save_with_stats(&document, &config.output, config.options.overwrite_mode)
            .await?;

        report.write = Some(stats);
        Ok(report)
    }
}

/// Reorder with a formatter built from the configuration.
///
/// # Errors
///
/// Same as [`Reorderer::reorder`].
pub async fn reorder(config: &ReorderConfig) -> Result<ReorderReport> {
    Reorderer::new(OutputFormatter::from_options(&config.options))
        .reorder(config)
        .await
}
