//! Integration tests for error handling and exit codes.

use pdfops::config::{MergeConfig, ReorderConfig, SplitConfig};
use pdfops::error::{ErrorKind, PdfOpsError};
use pdfops::ops::{merge::merge, reorder::reorder, split::split};

use crate::common::{arg, scratch_dir, write_chapters, write_pdf};

#[tokio::test]
async fn test_merge_missing_input_is_not_found() {
    let dir = scratch_dir();
    let config = MergeConfig::new(dir.path().join("out.pdf"), ["/nonexistent/file.pdf"]);

    let err = merge(&config).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_merge_existing_output_is_already_exists() {
    let dir = scratch_dir();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let output = write_pdf(dir.path(), "out.pdf", 1);

    let err = merge(&MergeConfig::new(&output, [arg(&a)])).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}

#[tokio::test]
async fn test_merge_invalid_pdf_is_parse_error() {
    let dir = scratch_dir();
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, "garbage").unwrap();

    let err = merge(&MergeConfig::new(dir.path().join("out.pdf"), [arg(&bad)]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[tokio::test]
async fn test_reorder_odd_page_count_is_invalid_argument() {
    let dir = scratch_dir();
    let input = write_pdf(dir.path(), "scan.pdf", 3);
    let output = dir.path().join("book.pdf");

    let err = reorder(&ReorderConfig::new(&input, &output))
        .await
        .unwrap_err();
    assert!(matches!(err, PdfOpsError::OddPageCount { page_count: 3 }));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_split_bad_row_is_parse_error() {
    let dir = scratch_dir();
    let input = write_pdf(dir.path(), "book.pdf", 3);
    let chapters = write_chapters(dir.path(), "name,start,end\na,1,2\nb,three,3\n");

    let err = split(&SplitConfig::new(&input, &chapters))
        .await
        .unwrap_err();
    match &err {
        PdfOpsError::InvalidChapterList { line_number, .. } => assert_eq!(*line_number, 3),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::ParseError);
    assert!(!dir.path().join("a").exists());
}

#[tokio::test]
async fn test_split_missing_input_is_not_found() {
    let dir = scratch_dir();
    let chapters = write_chapters(dir.path(), "name,start,end\na,1,1\n");

    let err = split(&SplitConfig::new(dir.path().join("missing.pdf"), &chapters))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
