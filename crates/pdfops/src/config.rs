//! Configuration for the merge, reorder and split operations.
//!
//! The CLI turns its arguments into one of [`MergeConfig`], [`ReorderConfig`]
//! or [`SplitConfig`]. Each is validated before any file is touched, and all
//! of them share the same [`OutputOptions`].

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::PdfOpsError;
use crate::io::ExpandOptions;

/// Compression level for output PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact structure.
    None,
    /// Compress content streams.
    #[default]
    Standard,
    /// Prune unreachable objects, then compress.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfOpsError;

    /// Parse compression level from `"none"`, `"standard"` or `"maximum"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string doesn't match a valid compression level.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfOpsError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// What to do when an output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Never overwrite, error if the file exists (default).
    #[default]
    NoClobber,
    /// Always overwrite.
    Force,
}

impl OverwriteMode {
    /// Overwrite mode for a `--force` flag.
    pub fn from_force(force: bool) -> Self {
        if force { Self::Force } else { Self::NoClobber }
    }
}

/// Settings shared by every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Validate and report without writing anything.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print reports as JSON instead of text.
    pub json: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,
}

impl OutputOptions {
    /// Validate option combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if verbose and quiet modes are both enabled.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }
        Ok(())
    }

    /// Check if human-readable output should be displayed.
    ///
    /// JSON mode keeps stdout for the report alone.
    pub fn should_print(&self) -> bool {
        !self.json && (!self.quiet || self.dry_run)
    }
}

/// Configuration for concatenating files.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Output PDF file path.
    pub output: PathBuf,

    /// Input arguments in merge order: files, directories or glob patterns.
    pub inputs: Vec<String>,

    /// Number of leading pages dropped from every input.
    pub strip_front: Option<usize>,

    /// How directory inputs are expanded.
    pub expand: ExpandOptions,

    /// Shared output settings.
    pub options: OutputOptions,
}

impl MergeConfig {
    /// Create a merge configuration with default options.
    pub fn new<I, S>(output: impl Into<PathBuf>, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: output.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            strip_front: None,
            expand: ExpandOptions::default(),
            options: OutputOptions::default(),
        }
    }

    /// Pages dropped from the front of every input.
    pub fn skip_front(&self) -> usize {
        self.strip_front.unwrap_or(0)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No inputs are specified
    /// - The output path is empty
    /// - The output path is also given as a plain input
    /// - The directory pattern is empty
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;

        if self.inputs.is_empty() {
            return Err(PdfOpsError::NoInputFiles.into());
        }

        validate_output_path(&self.output)?;

        if self.expand.pattern.trim().is_empty() {
            bail!("Directory pattern cannot be empty");
        }

        for input in &self.inputs {
            if Path::new(input) == self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }
}

/// Configuration for reordering the pages of one file.
#[derive(Debug, Clone)]
pub struct ReorderConfig {
    /// Input PDF file path.
    pub input: PathBuf,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Apply the inverse transform, restoring the scanned order.
    pub undo: bool,

    /// Shared output settings.
    pub options: OutputOptions,
}

impl ReorderConfig {
    /// Create a reorder configuration with default options.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            undo: false,
            options: OutputOptions::default(),
        }
    }

    /// Validate the configuration.
    ///
    /// Writing over the input is allowed, but only when overwriting is forced.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is empty, or if output equals input without
    /// [`OverwriteMode::Force`].
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        validate_output_path(&self.output)?;

        if self.input.as_os_str().is_empty() {
            bail!("Input path cannot be empty");
        }

        if self.input == self.output && self.options.overwrite_mode != OverwriteMode::Force {
            bail!(
                "Output file is the input file: {} (use --force to replace it)",
                self.output.display()
            );
        }

        Ok(())
    }
}

/// Configuration for splitting one file into chapters.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Input PDF file path.
    pub input: PathBuf,

    /// CSV chapter list.
    pub chapters: PathBuf,

    /// Directory receiving chapter files (None = the input's directory).
    pub output_dir: Option<PathBuf>,

    /// Shared output settings.
    pub options: OutputOptions,
}

impl SplitConfig {
    /// Create a split configuration with default options.
    pub fn new(input: impl Into<PathBuf>, chapters: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            chapters: chapters.into(),
            output_dir: None,
            options: OutputOptions::default(),
        }
    }

    /// Directory chapter files are written to.
    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            self.input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        })
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the input or chapter list path is empty.
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;

        if self.input.as_os_str().is_empty() {
            bail!("Input path cannot be empty");
        }

        if self.chapters.as_os_str().is_empty() {
            bail!("Chapter list path cannot be empty");
        }

        Ok(())
    }
}

fn validate_output_path(output: &Path) -> Result<()> {
    if output.as_os_str().is_empty() {
        bail!("Output path cannot be empty");
    }
    Ok(())
}
