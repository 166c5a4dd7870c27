//! PDF input/output.
//!
//! - [`reader`]: loading documents ([`PdfReader`])
//! - [`writer`]: writing documents with overwrite protection ([`PdfWriter`])
//! - [`inputs`]: expanding files, directories and glob patterns

pub mod inputs;
pub mod reader;
pub mod writer;

pub use inputs::{DEFAULT_DIRECTORY_PATTERN, ExpandOptions, expand_inputs};
pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
