//! Error types for pdfops.
//!
//! Every failure an operation can produce is a [`PdfOpsError`]. Variants are
//! grouped into a small set of [`ErrorKind`]s which decide the process exit
//! code at the command-line boundary.
//!
//! # Error Categories
//!
//! - **NotFound**: a required file, directory or pattern match is missing
//! - **AlreadyExists**: writing would overwrite an existing file
//! - **EmptyInput**: nothing to process
//! - **InvalidArgument**: malformed input to a transform or a bad option
//! - **ParseError**: malformed document or chapter list
//! - **Io**: failures while reading or writing

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfops operations.
pub type Result<T> = std::result::Result<T, PdfOpsError>;

/// Coarse classification of a [`PdfOpsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required file is missing.
    NotFound,
    /// The operation would overwrite an existing file.
    AlreadyExists,
    /// There is nothing to process.
    EmptyInput,
    /// A transform or option received an invalid value.
    InvalidArgument,
    /// A document or chapter list could not be parsed.
    ParseError,
    /// Reading or writing failed.
    Io,
}

/// Main error type for pdfops operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfOpsError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// A glob pattern matched no files.
    #[error("No files match pattern: {pattern}")]
    NoMatches {
        /// The pattern as given on the command line.
        pattern: String,
    },

    /// Failed to parse a PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the PDF library.
        reason: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// A chapter list row could not be parsed or is inconsistent.
    #[error(
        "Invalid entry in chapter list: {} at line {line_number}\n  Details: {details}",
        .path.display()
    )]
    InvalidChapterList {
        /// Path to the chapter list file.
        path: PathBuf,
        /// 1-based line number of the offending row.
        line_number: u64,
        /// What is wrong with the row.
        details: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// No input files were given or found.
    #[error("No input files to process")]
    NoInputFiles,

    /// The operation would produce a document without pages.
    #[error("Resulting document would have no pages: {reason}")]
    NoPages {
        /// Why no pages are left.
        reason: String,
    },

    /// The reorder transform only accepts an even page count.
    #[error("Cannot reorder {page_count} page(s): the page count must be even")]
    OddPageCount {
        /// The offending page count.
        page_count: usize,
    },

    /// A 1-based page range does not fit the document.
    #[error(
        "Invalid page range {start}-{stop}: document has {total_pages} page(s). \
         Page numbers must satisfy 1 <= start <= stop <= {total_pages}"
    )]
    InvalidPageRange {
        /// First page (1-based, inclusive).
        start: u32,
        /// Last page (1-based, inclusive).
        stop: u32,
        /// Pages in the document.
        total_pages: usize,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to read the chapter list file.
    #[error("Failed to read chapter list: {}\n  Reason: {source}", .path.display())]
    FailedToReadChapterList {
        /// Path to the chapter list.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfOpsError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfOpsError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<PdfOpsError>() {
            Ok(err) => err,
            Err(err) => Self::invalid_config(err.to_string()),
        }
    }
}

impl PdfOpsError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidChapterList error.
    pub fn invalid_chapter_list(
        path: PathBuf,
        line_number: u64,
        details: impl Into<String>,
    ) -> Self {
        Self::InvalidChapterList {
            path,
            line_number,
            details: details.into(),
        }
    }

    /// Create a NoPages error.
    pub fn no_pages(reason: impl Into<String>) -> Self {
        Self::NoPages {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } | Self::NotAFile { .. } | Self::NoMatches { .. } => {
                ErrorKind::NotFound
            }
            Self::FailedToLoadPdf { .. }
            | Self::EncryptedPdf { .. }
            | Self::InvalidChapterList { .. } => ErrorKind::ParseError,
            Self::OutputExists { .. } => ErrorKind::AlreadyExists,
            Self::NoInputFiles | Self::NoPages { .. } => ErrorKind::EmptyInput,
            Self::OddPageCount { .. }
            | Self::InvalidPageRange { .. }
            | Self::InvalidConfig { .. }
            | Self::Other { .. } => ErrorKind::InvalidArgument,
            Self::FailedToCreateOutput { .. }
            | Self::FailedToWrite { .. }
            | Self::FailedToReadChapterList { .. }
            | Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Get the process exit code for this error.
    ///
    /// Code 2 is left to the argument parser's usage errors.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::NotFound => 3,
            ErrorKind::ParseError => 4,
            ErrorKind::AlreadyExists => 5,
            ErrorKind::Io => 6,
            ErrorKind::EmptyInput | ErrorKind::InvalidArgument => 1,
        }
    }
}
