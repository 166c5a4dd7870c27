//! Integration tests for reordering.

use pdfops::config::{CompressionLevel, ReorderConfig};
use pdfops::ops::reorder::reorder;
use rstest::rstest;

use crate::common::{page_tags, scratch_dir, write_pdf};

#[rstest]
#[case(2, vec![0, 1])]
#[case(4, vec![0, 3, 1, 2])]
#[case(8, vec![0, 7, 1, 6, 2, 5, 3, 4])]
#[tokio::test]
async fn test_reorder_writes_book_order(#[case] pages: usize, #[case] expected: Vec<usize>) {
    let dir = scratch_dir();
    let input = write_pdf(dir.path(), "scan.pdf", pages);
    let output = dir.path().join("book.pdf");

    let mut config = ReorderConfig::new(&input, &output);
    config.options.quiet = true;
    reorder(&config).await.unwrap();

    assert_eq!(page_tags(&output), expected);
}

#[tokio::test]
async fn test_reorder_without_compression() {
    let dir = scratch_dir();
    let input = write_pdf(dir.path(), "scan.pdf", 6);
    let output = dir.path().join("book.pdf");

    let mut config = ReorderConfig::new(&input, &output);
    config.options.quiet = true;
    config.options.compression = CompressionLevel::None;
    let report = reorder(&config).await.unwrap();

    let stats = report.write.unwrap();
    assert!(!stats.compressed);
    assert_eq!(stats.page_count, 6);
    assert_eq!(page_tags(&output), vec![0, 5, 1, 4, 2, 3]);
}

#[tokio::test]
async fn test_reorder_twice_is_not_identity() {
    let dir = scratch_dir();
    let input = write_pdf(dir.path(), "scan.pdf", 8);
    let once = dir.path().join("once.pdf");
    let twice = dir.path().join("twice.pdf");

    let mut config = ReorderConfig::new(&input, &once);
    config.options.quiet = true;
    reorder(&config).await.unwrap();

    let mut config = ReorderConfig::new(&once, &twice);
    config.options.quiet = true;
    reorder(&config).await.unwrap();

    assert_ne!(page_tags(&twice), (0..8).collect::<Vec<_>>());
}
