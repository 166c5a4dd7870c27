//! Carving one file into chapter files.

use serde::Serialize;
use std::path::PathBuf;

use crate::chapters::{Chapter, load_chapters, validate_chapters};
use crate::config::SplitConfig;
use crate::error::{PdfOpsError, Result};
use crate::io::{PdfReader, PdfWriter, WriteStatistics};
use crate::output::OutputFormatter;
use crate::pages::PageEditor;

/// One chapter file of a split.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChapter {
    /// The chapter as listed.
    #[serde(flatten)]
    pub chapter: Chapter,

    /// Where the chapter is written.
    pub path: PathBuf,

    /// Write statistics, absent on a dry run.
    pub write: Option<WriteStatistics>,
}

/// Summary of a split.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    /// Input file path.
    pub input: PathBuf,

    /// Directory chapter files are written to.
    pub output_dir: PathBuf,

    /// Pages in the input.
    pub total_pages: usize,

    /// Chapters in list order.
    pub chapters: Vec<SplitChapter>,

    /// Nothing was written.
    pub dry_run: bool,
}

/// Splits a file according to a chapter list.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    reader: PdfReader,
    editor: PageEditor,
    formatter: OutputFormatter,
}

impl Splitter {
    /// Create a splitter reporting through `formatter`.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            reader: PdfReader::new(),
            editor: PageEditor::new(),
            formatter,
        }
    }

    /// Run the split described by `config`.
    ///
    /// Every chapter range and every target file is checked before the first
    /// chapter is written, so a bad row never leaves a partial set of files.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input or the chapter list does not exist
    /// - The input is not a valid PDF or the chapter list is malformed
    /// - The chapter list is empty
    /// - A chapter lies outside the document
    /// - A chapter file exists and overwriting is not forced
    /// - Writing fails
    pub async fn split(&self, config: &SplitConfig) -> Result<SplitReport> {
        config.validate()?;

        PdfReader::check_path_exists(&config.input).await?;
        let chapters = load_chapters(&config.chapters).await?;

        if chapters.is_empty() {
            return Err(PdfOpsError::no_pages(format!(
                "chapter list {} has no chapters",
                config.chapters.display()
            )));
        }

        let loaded = self.reader.load(&config.input).await?;
        validate_chapters(&chapters, loaded.page_count)?;

        let output_dir = config.effective_output_dir();
        let writer = PdfWriter::with_compression(config.options.compression);

        let mut planned = Vec::with_capacity(chapters.len());
        for chapter in chapters {
            let path = output_dir.join(&chapter.name);

            if path == config.input {
                return Err(PdfOpsError::invalid_config(format!(
                    "Chapter {} would overwrite the input file",
                    chapter.name
                )));
            }

            writer
                .check_target(&path, config.options.overwrite_mode)
                .await?;

            planned.push(SplitChapter {
                chapter,
                path,
                write: None,
            });
        }

        for planned_chapter in &mut planned {
            let chapter = &planned_chapter.chapter;
            self.formatter.info(&format!(
                "Writing to {} pages {} to {}",
                chapter.name, chapter.start, chapter.stop
            ));

            if config.options.dry_run {
                continue;
            }

            let pages = chapter.pages(loaded.page_count)?;
            let document = self.editor.select(&loaded.document, &pages)?;
            let stats = writer
                .save_with_stats(&document, &planned_chapter.path, config.options.overwrite_mode)
                .await?;

            planned_chapter.write = Some(stats);
        }

        tracing::debug!(
            input = %config.input.display(),
            chapters = planned.len(),
            dry_run = config.options.dry_run,
            "split document"
        );

        Ok(SplitReport {
            input: config.input.clone(),
            output_dir,
            total_pages: loaded.page_count,
            chapters: planned,
            dry_run: config.options.dry_run,
        })
    }
}

/// Split with a formatter built from the configuration.
///
/// # Errors
///
/// Same as [`Splitter::split`].
pub async fn split(config: &SplitConfig) -> Result<SplitReport> {
    Splitter::new(OutputFormatter::from_options(&config.options))
        .split(config)
        .await
}
