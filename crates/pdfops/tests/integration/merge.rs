//! Integration tests for merging.

use pdfops::config::{MergeConfig, OverwriteMode};
use pdfops::ops::merge::merge;

use crate::common::{arg, page_tags, scratch_dir, write_pdf};

fn quiet(mut config: MergeConfig) -> MergeConfig {
    config.options.quiet = true;
    config
}

#[tokio::test]
async fn test_merge_files_in_argument_order() {
    let dir = scratch_dir();
    let a = write_pdf(dir.path(), "a.pdf", 2);
    let b = write_pdf(dir.path(), "b.pdf", 1);
    let c = write_pdf(dir.path(), "c.pdf", 3);
    let output = dir.path().join("out.pdf");

    let config = quiet(MergeConfig::new(&output, [arg(&c), arg(&a), arg(&b)]));
    let report = merge(&config).await.unwrap();

    assert_eq!(report.total_pages, 6);
    assert_eq!(page_tags(&output), vec![0, 1, 2, 0, 1, 0]);
}

#[tokio::test]
async fn test_merge_directory_in_name_order() {
    let dir = scratch_dir();
    let scans = dir.path().join("scans");
    std::fs::create_dir(&scans).unwrap();
    write_pdf(&scans, "02.pdf", 1);
    write_pdf(&scans, "01.pdf", 2);
    std::fs::write(scans.join("readme.txt"), "not a pdf").unwrap();
    let output = dir.path().join("out.pdf");

    let report = merge(&quiet(MergeConfig::new(&output, [arg(&scans)])))
        .await
        .unwrap();

    let names: Vec<_> = report
        .inputs
        .iter()
        .map(|input| input.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["01.pdf", "02.pdf"]);
    assert_eq!(page_tags(&output), vec![0, 1, 0]);
}

#[tokio::test]
async fn test_merge_glob_pattern() {
    let dir = scratch_dir();
    write_pdf(dir.path(), "part-b.pdf", 1);
    write_pdf(dir.path(), "part-a.pdf", 2);
    write_pdf(dir.path(), "other.pdf", 4);
    let output = dir.path().join("merged.pdf");

    let pattern = format!("{}/part-*.pdf", dir.path().display());
    let report = merge(&quiet(MergeConfig::new(&output, [pattern])))
        .await
        .unwrap();

    assert_eq!(report.inputs.len(), 2);
    assert_eq!(page_tags(&output), vec![0, 1, 0]);
}

#[tokio::test]
async fn test_merge_strip_front_applies_to_every_input() {
    let dir = scratch_dir();
    let a = write_pdf(dir.path(), "a.pdf", 3);
    let b = write_pdf(dir.path(), "b.pdf", 4);
    let output = dir.path().join("out.pdf");

    let mut config = quiet(MergeConfig::new(&output, [arg(&a), arg(&b)]));
    config.strip_front = Some(2);
    merge(&config).await.unwrap();

    assert_eq!(page_tags(&output), vec![2, 2, 3]);
}

#[tokio::test]
async fn test_merge_force_replaces_output() {
    let dir = scratch_dir();
    let a = write_pdf(dir.path(), "a.pdf", 2);
    let output = write_pdf(dir.path(), "out.pdf", 5);

    let mut config = quiet(MergeConfig::new(&output, [arg(&a)]));
    config.options.overwrite_mode = OverwriteMode::Force;
    merge(&config).await.unwrap();

    assert_eq!(page_tags(&output), vec![0, 1]);
}
