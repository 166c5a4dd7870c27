//! Integration tests for splitting.

use pdfops::config::SplitConfig;
use pdfops::ops::split::split;

use crate::common::{page_tags, scratch_dir, write_chapters, write_pdf};

#[tokio::test]
async fn test_split_chapter_contains_exact_pages() {
    let dir = scratch_dir();
    let input = write_pdf(dir.path(), "book.pdf", 5);
    let chapters = write_chapters(dir.path(), "name,start,end\na,1,3\n");

    let mut config = SplitConfig::new(&input, &chapters);
    config.options.quiet = true;
    split(&config).await.unwrap();

    assert_eq!(page_tags(&dir.path().join("a")), vec![0, 1, 2]);
}

#[tokio::test]
async fn test_split_whole_book() {
    let dir = scratch_dir();
    let input = write_pdf(dir.path(), "book.pdf", 7);
    let chapters = write_chapters(
        dir.path(),
        "name,start,end,title\n\
         ch1.pdf,1,2,Beginning\n\
         ch2.pdf,3,6,Middle\n\
         ch3.pdf,7,7,End\n",
    );

    let mut config = SplitConfig::new(&input, &chapters);
    config.options.quiet = true;
    let report = split(&config).await.unwrap();

    assert_eq!(report.total_pages, 7);
    assert_eq!(report.chapters.len(), 3);
    assert_eq!(page_tags(&dir.path().join("ch1.pdf")), vec![0, 1]);
    assert_eq!(page_tags(&dir.path().join("ch2.pdf")), vec![2, 3, 4, 5]);
    assert_eq!(page_tags(&dir.path().join("ch3.pdf")), vec![6]);
}

#[tokio::test]
async fn test_split_overlapping_chapters() {
    let dir = scratch_dir();
    let input = write_pdf(dir.path(), "book.pdf", 4);
    let chapters = write_chapters(dir.path(), "name,start,end\nx,1,3\ny,2,4\n");

    let mut config = SplitConfig::new(&input, &chapters);
    config.options.quiet = true;
    split(&config).await.unwrap();

    assert_eq!(page_tags(&dir.path().join("x")), vec![0, 1, 2]);
    assert_eq!(page_tags(&dir.path().join("y")), vec![1, 2, 3]);
}
