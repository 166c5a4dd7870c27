//! Concatenating files.

use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::MergeConfig;
use crate::error::{PdfOpsError, Result};
use crate::io::{LoadedPdf, PdfReader, PdfWriter, WriteStatistics, expand_inputs};
use crate::output::OutputFormatter;
use crate::pages::PageEditor;

/// One input of a merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedInput {
    /// Path of the input file.
    pub path: PathBuf,

    /// Pages in the input.
    pub page_count: usize,

    /// Pages taken after stripping the front.
    pub pages_used: usize,
}

/// Summary of a merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Output file path.
    pub output: PathBuf,

    /// Inputs in merge order.
    pub inputs: Vec<MergedInput>,

    /// Pages dropped from the front of every input.
    pub strip_front: usize,

    /// Pages in the merged document.
    pub total_pages: usize,

    /// Time spent loading inputs.
    pub load_time: Duration,

    /// Nothing was written.
    pub dry_run: bool,

    /// Write statistics, absent on a dry run.
    pub write: Option<WriteStatistics>,
}

impl MergeReport {
    /// Number of inputs that contributed pages.
    pub fn files_merged(&self) -> usize {
        self.inputs.iter().filter(|input| input.pages_used > 0).count()
    }
}

/// Merges the inputs of a [`MergeConfig`] into one document.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    editor: PageEditor,
    formatter: OutputFormatter,
}

impl Merger {
    /// Create a merger reporting through `formatter`.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            reader: PdfReader::new(),
            editor: PageEditor::new(),
            formatter,
        }
    }

    /// Run the merge described by `config`.
    ///
    /// Inputs are expanded, then loaded one after another in argument
    /// order. The output is checked before anything is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - An input does not exist or matches nothing
    /// - The output exists and overwriting is not forced
    /// - An input is not a valid PDF
    /// - No page is left after stripping
    /// - Writing fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::config::MergeConfig;
    /// # use pdfops::ops::Merger;
    /// # use pdfops::output::OutputFormatter;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut config = MergeConfig::new("book.pdf", ["scans/"]);
    /// config.strip_front = Some(1);
    ///
    /// let report = Merger::new(OutputFormatter::default()).merge(&config).await?;
    /// println!("{} pages", report.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, config: &MergeConfig) -> Result<MergeReport> {
        config.validate()?;

        let paths = expand_inputs(&config.inputs, &config.expand)?;

        if paths.iter().any(|path| *path == config.output) {
            return Err(PdfOpsError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                config.output.display()
            )));
        }

        let writer = PdfWriter::with_compression(config.options.compression);
        writer
            .check_target(&config.output, config.options.overwrite_mode)
            .await?;

        let load_start = Instant::now();
        let loaded = self.reader.load_sequential(&paths).await?;
        let load_time = load_start.elapsed();

        let skip_front = config.skip_front();
        let inputs = self.describe_inputs(&loaded, skip_front);
        let total_pages: usize = inputs.iter().map(|input| input.pages_used).sum();

        if total_pages == 0 {
            return Err(PdfOpsError::no_pages(if skip_front > 0 {
                format!("no pages left after stripping {skip_front} page(s) from every input")
            } else {
                "inputs contain no pages".to_string()
            }));
        }

        let mut report = MergeReport {
            output: config.output.clone(),
            inputs,
            strip_front: skip_front,
            total_pages,
            load_time,
            dry_run: config.options.dry_run,
            write: None,
        };

        if config.options.dry_run {
            return Ok(report);
        }

        let document = self
            .editor
            .concat_skipping_front(loaded.iter().map(|pdf| &pdf.document), skip_front)?;

        let stats = writer
            .save_with_stats(&document, &config.output, config.options.overwrite_mode)
            .await?;

        tracing::debug!(
            output = %config.output.display(),
            files = report.files_merged(),
            pages = total_pages,
            "merged documents"
        );

        report.write = Some(stats);
        Ok(report)
    }

    fn describe_inputs(&self, loaded: &[LoadedPdf], skip_front: usize) -> Vec<MergedInput> {
        loaded
            .iter()
            .map(|pdf| {
                self.formatter.info(&format!("Adding {}", pdf.path.display()));

                let pages_used = pdf.page_count.saturating_sub(skip_front);
                if pages_used == 0 {
                    self.formatter.warning(&format!(
                        "{} has {} page(s); nothing left to add",
                        pdf.display_name(),
                        pdf.page_count
                    ));
                }

                MergedInput {
                    path: pdf.path.clone(),
                    page_count: pdf.page_count,
                    pages_used,
                }
            })
            .collect()
    }
}

/// Merge with a formatter built from the configuration.
///
/// # Errors
///
/// Same as [`Merger::merge`].
pub async fn merge(config: &MergeConfig) -> Result<MergeReport> {
    Merger::new(OutputFormatter::from_options(&config.options))
        .merge(config)
        .await
}
