//! CLI argument parsing for pdfops.
//!
//! Three subcommands share a set of global flags. Each subcommand converts
//! into the matching library configuration through [`Cli::to_command`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfops::config::{
    CompressionLevel, MergeConfig, OutputOptions, OverwriteMode, ReorderConfig, SplitConfig,
};
use pdfops::error::Result;
use pdfops::io::{DEFAULT_DIRECTORY_PATTERN, ExpandOptions};

/// Merge, reorder and split PDF documents.
#[derive(Parser, Debug)]
#[command(name = "pdfops")]
#[command(version)]
#[command(about = "Merge, reorder and split PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Flags shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Dry run - validate inputs and report without writing anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output - show statistics and diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Overwrite existing output files
    ///
    /// Without this flag, every subcommand refuses to replace a file.
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Compression level for output PDFs
    ///
    /// - none: No compression (preserves exact structure)
    /// - standard: Compress content streams (default)
    /// - maximum: Also drop unreachable objects
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "standard",
        env = "PDFOPS_COMPRESSION"
    )]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Concatenate PDF files into one document
    ///
    /// Inputs may be files, directories (all PDFs inside, by name) or glob
    /// patterns. They are merged in the order given.
    ///
    /// Examples:
    ///   pdfops merge book.pdf cover.pdf chapters/ 'appendix-*.pdf'
    ///   pdfops merge --stripfront 1 scans.pdf scans/
    Merge {
        /// Output PDF file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Input files, directories or glob patterns (in order)
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<String>,

        /// Drop the first N pages of every input
        #[arg(long = "stripfront", value_name = "N")]
        strip_front: Option<usize>,

        /// File-name pattern for directory inputs (case-insensitive)
        #[arg(long, value_name = "GLOB", default_value = DEFAULT_DIRECTORY_PATTERN)]
        pattern: String,

        /// Include files in subdirectories of directory inputs
        #[arg(short, long)]
        recursive: bool,
    },

    /// Restore the reading order of a duplex scan
    ///
    /// For a scan of all fronts in order followed by all backs in reverse,
    /// writes the pages as 1, n, 2, n-1, ... The page count must be even.
    Reorder {
        /// Scanned PDF file
        #[arg(value_name = "FILENAME")]
        input: PathBuf,

        /// Output PDF file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Apply the inverse order, turning a reordered file back into the
        /// scanned order
        #[arg(long)]
        undo: bool,
    },

    /// Split a PDF into chapter files listed in a CSV file
    ///
    /// The CSV needs a header with the columns name,start,end. Pages are
    /// 1-based and inclusive; each row writes one file called `name`.
    Split {
        /// PDF file to split
        #[arg(value_name = "FILENAME")]
        input: PathBuf,

        /// CSV chapter list
        #[arg(value_name = "CHAPTERS")]
        chapters: PathBuf,

        /// Directory for chapter files (default: the input's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

/// A subcommand turned into its library configuration.
#[derive(Debug, Clone)]
pub enum CommandConfig {
    /// Concatenate files.
    Merge(MergeConfig),
    /// Reorder one file.
    Reorder(ReorderConfig),
    /// Split one file.
    Split(SplitConfig),
}

impl CommandConfig {
    /// Shared output settings of the command.
    pub fn options(&self) -> &OutputOptions {
        match self {
            Self::Merge(config) => &config.options,
            Self::Reorder(config) => &config.options,
            Self::Split(config) => &config.options,
        }
    }
}

impl GlobalArgs {
    /// Convert the global flags into shared output options.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is invalid.
    pub fn to_options(&self) -> Result<OutputOptions> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        Ok(OutputOptions {
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            overwrite_mode: OverwriteMode::from_force(self.force),
            compression,
        })
    }
}

impl Cli {
    /// Convert CLI arguments into a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid or conflicting.
    pub fn to_command(&self) -> Result<CommandConfig> {
        let options = self.global.to_options()?;

        let config = match &self.command {
            Command::Merge {
                output,
                inputs,
                strip_front,
                pattern,
                recursive,
            } => {
                let config = MergeConfig {
                    output: output.clone(),
                    inputs: inputs.clone(),
                    strip_front: *strip_front,
                    expand: ExpandOptions {
                        pattern: pattern.clone(),
                        recursive: *recursive,
                    },
                    options,
                };
                config.validate()?;
                CommandConfig::Merge(config)
            }
            Command::Reorder {
                input,
                output,
                undo,
            } => {
                let config = ReorderConfig {
                    input: input.clone(),
                    output: output.clone(),
                    undo: *undo,
                    options,
                };
                config.validate()?;
                CommandConfig::Reorder(config)
            }
            Command::Split {
                input,
                chapters,
                output_dir,
            } => {
                let config = SplitConfig {
                    input: input.clone(),
                    chapters: chapters.clone(),
                    output_dir: output_dir.clone(),
                    options,
                };
                config.validate()?;
                CommandConfig::Split(config)
            }
        };

        Ok(config)
    }
}
