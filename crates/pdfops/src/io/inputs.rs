//! Expansion of command-line inputs into concrete files.
//!
//! Every argument is classified on its own:
//!
//! 1. an existing file is taken as is;
//! 2. an existing directory contributes the files inside it whose name
//!    matches [`ExpandOptions::pattern`], sorted by name;
//! 3. anything else is treated as a glob pattern, expanded in lexical order,
//!    with matched directories expanded as in (2).

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PdfOpsError, Result};

/// Default file-name pattern for directory inputs.
pub const DEFAULT_DIRECTORY_PATTERN: &str = "*.pdf";

/// How directory inputs are expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    /// File-name pattern selecting files inside directories (case-insensitive).
    pub pattern: String,

    /// Descend into subdirectories.
    pub recursive: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DIRECTORY_PATTERN.to_string(),
            recursive: false,
        }
    }
}

/// Expand files, directories and glob patterns into a flat list of files.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.
/// `&[&str]` or `Vec<String>`. Order follows the arguments; within one
/// argument, paths are sorted.
///
/// # Errors
///
/// - [`PdfOpsError::FileNotFound`] for a plain path that does not exist
/// - [`PdfOpsError::NoMatches`] for a pattern or directory matching nothing
/// - [`PdfOpsError::NoInputFiles`] if there are no arguments at all
/// - [`PdfOpsError::InvalidConfig`] for malformed patterns
pub fn expand_inputs<T>(inputs: T, options: &ExpandOptions) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let matcher = build_matcher(&options.pattern)?;
    let mut resolved_paths = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        let path = Path::new(input);

        if path.is_file() {
            resolved_paths.push(path.to_path_buf());
        } else if path.is_dir() {
            resolved_paths.extend(expand_directory(path, &matcher, options)?);
        } else if is_glob_pattern(input) {
            resolved_paths.extend(expand_pattern(input, &matcher, options)?);
        } else {
            return Err(PdfOpsError::file_not_found(path.to_path_buf()));
        }
    }

    if resolved_paths.is_empty() {
        return Err(PdfOpsError::NoInputFiles);
    }

    tracing::debug!(count = resolved_paths.len(), "expanded inputs");

    Ok(resolved_paths)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map_err(|err| {
            PdfOpsError::invalid_config(format!("Invalid file pattern '{pattern}': {err}"))
        })?;

    Ok(glob.compile_matcher())
}

fn expand_directory(
    dir: &Path,
    matcher: &GlobMatcher,
    options: &ExpandOptions,
) -> Result<Vec<PathBuf>> {
    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut resolved_paths = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| PdfOpsError::from(std::io::Error::from(err)))?;

        if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
            resolved_paths.push(entry.into_path());
        }
    }

    if resolved_paths.is_empty() {
        return Err(PdfOpsError::NoMatches {
            pattern: dir.join(&options.pattern).display().to_string(),
        });
    }

    Ok(resolved_paths)
}

fn expand_pattern(
    pattern: &str,
    matcher: &GlobMatcher,
    options: &ExpandOptions,
) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| {
        PdfOpsError::invalid_config(format!("Invalid glob pattern '{pattern}': {err}"))
    })?;

    let mut resolved_paths = Vec::new();

    for entry in paths {
        let path = entry.map_err(|err| PdfOpsError::from(err.into_error()))?;

        if path.is_dir() {
            resolved_paths.extend(expand_directory(&path, matcher, options)?);
        } else if path.is_file() {
            resolved_paths.push(path);
        }
    }

    if resolved_paths.is_empty() {
        return Err(PdfOpsError::NoMatches {
            pattern: pattern.to_string(),
        });
    }

    Ok(resolved_paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"%PDF-1.4").unwrap();
        path
    }

    fn arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_plain_files_keep_argument_order() {
        let temp_dir = TempDir::new().unwrap();
        let b = touch(temp_dir.path(), "b.pdf");
        let a = touch(temp_dir.path(), "a.pdf");

        let paths = expand_inputs([arg(&b), arg(&a)], &ExpandOptions::default()).unwrap();
        assert_eq!(paths, vec![b, a]);
    }

    #[test]
    fn test_directory_expands_sorted_pdfs_only() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "b.pdf");
        touch(temp_dir.path(), "A.PDF");
        touch(temp_dir.path(), "notes.txt");
        touch(temp_dir.path(), "nested/c.pdf");

        let paths = expand_inputs([arg(temp_dir.path())], &ExpandOptions::default()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["A.PDF", "b.pdf"]);
    }

    #[test]
    fn test_directory_recursive() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.pdf");
        touch(temp_dir.path(), "nested/c.pdf");

        let options = ExpandOptions {
            recursive: true,
            ..Default::default()
        };
        let paths = expand_inputs([arg(temp_dir.path())], &options).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_directory_with_custom_pattern() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "scan-1.pdf");
        touch(temp_dir.path(), "cover.pdf");

        let options = ExpandOptions {
            pattern: "scan-*.pdf".to_string(),
            ..Default::default()
        };
        let paths = expand_inputs([arg(temp_dir.path())], &options).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("scan-1.pdf"));
    }

    #[test]
    fn test_empty_directory_is_no_match() {
        let temp_dir = TempDir::new().unwrap();
        let err = expand_inputs([arg(temp_dir.path())], &ExpandOptions::default()).unwrap_err();
        assert!(matches!(err, PdfOpsError::NoMatches { .. }));
    }

    #[test]
    fn test_glob_pattern_and_directory_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "ch1.pdf");
        touch(temp_dir.path(), "ch2.pdf");
        touch(temp_dir.path(), "parts/p1.pdf");

        let pattern = format!("{}/ch*.pdf", temp_dir.path().display());
        let dir = arg(&temp_dir.path().join("parts"));

        let paths = expand_inputs([dir, pattern], &ExpandOptions::default()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["p1.pdf", "ch1.pdf", "ch2.pdf"]);
    }

    #[test]
    fn test_glob_matching_directory_expands_it() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "vol1/a.pdf");
        touch(temp_dir.path(), "vol2/b.pdf");

        let pattern = format!("{}/vol*", temp_dir.path().display());
        let paths = expand_inputs([pattern], &ExpandOptions::default()).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_missing_plain_path() {
        let err = expand_inputs(["/nonexistent/file.pdf"], &ExpandOptions::default()).unwrap_err();
        assert!(matches!(err, PdfOpsError::FileNotFound { .. }));
    }

    #[test]
    fn test_pattern_without_matches() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.pdf", temp_dir.path().display());
        let err = expand_inputs([pattern], &ExpandOptions::default()).unwrap_err();
        assert!(matches!(err, PdfOpsError::NoMatches { .. }));
    }

    #[test]
    fn test_no_inputs() {
        let err = expand_inputs(Vec::<String>::new(), &ExpandOptions::default()).unwrap_err();
        assert!(matches!(err, PdfOpsError::NoInputFiles));
    }

    #[test]
    fn test_invalid_directory_pattern() {
        let options = ExpandOptions {
            pattern: "[".to_string(),
            ..Default::default()
        };
        let err = expand_inputs(["a.pdf"], &options).unwrap_err();
        assert!(matches!(err, PdfOpsError::InvalidConfig { .. }));
    }

    #[test]
    #[serial]
    fn test_relative_pattern_from_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "one.pdf");
        touch(temp_dir.path(), "two.pdf");

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();
        let result = expand_inputs(["*.pdf"], &ExpandOptions::default());
        std::env::set_current_dir(previous).unwrap();

        let paths = result.unwrap();
        assert_eq!(paths, vec![PathBuf::from("one.pdf"), PathBuf::from("two.pdf")]);
    }
}
