//! Output formatting and display.
//!
//! This module handles all user-facing output:
//! - Formatted status messages ([`OutputFormatter`])
//! - Summary reports for each operation
//! - JSON reports
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::config::OutputOptions;
//! use pdfops::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::from_options(&OutputOptions::default());
//! formatter.info("Adding scan-1.pdf");
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter, Verbosity};

use serde::Serialize;

use crate::error::{PdfOpsError, Result};
use crate::io::WriteStatistics;
use crate::ops::{MergeReport, ReorderReport, SplitReport};

/// Print a report as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|err| PdfOpsError::other(format!("Failed to serialize report: {err}")))?;
    println!("{json}");
    Ok(())
}

/// Display the summary of a merge.
pub fn display_merge_report(formatter: &OutputFormatter, report: &MergeReport) {
    if report.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!(
            "  Would write {} page(s) from {} file(s) to {}",
            report.total_pages,
            report.files_merged(),
            report.output.display()
        ));
        return;
    }

    if let Some(stats) = &report.write {
        formatter.success(&format!(
            "Merged {} file(s) into {} ({} pages, {})",
            report.files_merged(),
            report.output.display(),
            report.total_pages,
            stats.format_file_size()
        ));
    }

    if formatter.is_verbose() {
        formatter.section("Statistics");
        formatter.detail("Input files", &report.inputs.len().to_string());
        formatter.detail("Stripped per input", &report.strip_front.to_string());
        formatter.detail("Total pages", &report.total_pages.to_string());
        formatter.detail(
            "Load time",
            &format!("{:.2}s", report.load_time.as_secs_f64()),
        );
        if let Some(stats) = &report.write {
            display_write_details(formatter, stats);
        }
    }
}

/// Display the summary of a reorder.
pub fn display_reorder_report(formatter: &OutputFormatter, report: &ReorderReport) {
    let direction = if report.undo { "Restored" } else { "Reordered" };

    if report.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!(
            "  {direction} order would be written to {}",
            report.output.display()
        ));
        return;
    }

    if let Some(stats) = &report.write {
        formatter.success(&format!(
            "{direction} {} page(s) into {} ({})",
            report.page_count,
            report.output.display(),
            stats.format_file_size()
        ));

        if formatter.is_verbose() {
            formatter.section("Statistics");
            display_write_details(formatter, stats);
        }
    }
}

/// Display the summary of a split.
pub fn display_split_report(formatter: &OutputFormatter, report: &SplitReport) {
    if report.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!(
            "  Would write {} chapter file(s) to {}",
            report.chapters.len(),
            report.output_dir.display()
        ));
        return;
    }

    formatter.success(&format!(
        "Split {} into {} chapter file(s)",
        report.input.display(),
        report.chapters.len()
    ));

    if formatter.is_verbose() {
        formatter.section("Chapters");
        for (index, chapter) in report.chapters.iter().enumerate() {
            let size = chapter
                .write
                .as_ref()
                .map(WriteStatistics::format_file_size)
                .unwrap_or_default();
            formatter.list_item(
                index + 1,
                &format!(
                    "{} ({} page(s), {size})",
                    chapter.path.display(),
                    chapter.chapter.page_count()
                ),
            );
        }
    }
}

fn display_write_details(formatter: &OutputFormatter, stats: &WriteStatistics) {
    formatter.detail("Output size", &stats.format_file_size());
    formatter.detail(
        "Write time",
        &format!("{:.2}s", stats.write_time.as_secs_f64()),
    );
    formatter.detail("Compression", if stats.compressed { "Yes" } else { "No" });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::Chapter;
    use crate::ops::SplitChapter;
    use crate::sequence::book_order;
    use std::path::PathBuf;
    use std::time::Duration;

    fn stats(path: &str) -> WriteStatistics {
        WriteStatistics {
            write_time: Duration::from_millis(5),
            file_size: 2048,
            output_path: PathBuf::from(path),
            page_count: 4,
            compressed: true,
        }
    }

    fn reorder_report() -> ReorderReport {
        ReorderReport {
            input: PathBuf::from("scan.pdf"),
            output: PathBuf::from("book.pdf"),
            page_count: 4,
            undo: false,
            order: book_order(4).unwrap(),
            dry_run: false,
            write: Some(stats("book.pdf")),
        }
    }

    #[test]
    fn test_reorder_report_json() {
        let value = serde_json::to_value(reorder_report()).unwrap();
        assert_eq!(value["pageCount"], 4);
        assert_eq!(value["order"], serde_json::json!([0, 3, 1, 2]));
        assert_eq!(value["write"]["fileSize"], 2048);
    }

    #[test]
    fn test_split_report_json_flattens_chapter() {
        let report = SplitReport {
            input: PathBuf::from("book.pdf"),
            output_dir: PathBuf::from("."),
            total_pages: 5,
            chapters: vec![SplitChapter {
                chapter: Chapter::new("a", 1, 3),
                path: PathBuf::from("./a"),
                write: None,
            }],
            dry_run: true,
        };

        let value = serde_json::to_value(&report).unwrap();
        let chapter = &value["chapters"][0];
        assert_eq!(chapter["name"], "a");
        assert_eq!(chapter["start"], 1);
        assert_eq!(chapter["end"], 3);
        assert!(chapter["write"].is_null());
    }

    #[test]
    fn test_display_reports_do_not_panic() {
        let formatter = OutputFormatter::verbose();
        display_reorder_report(&formatter, &reorder_report());

        let mut dry = reorder_report();
        dry.dry_run = true;
        dry.write = None;
        display_reorder_report(&formatter, &dry);
    }

    #[test]
    fn test_print_json() {
        assert!(print_json(&reorder_report()).is_ok());
    }
}
