//! The three operations: merge, reorder and split.
//!
//! Each operation is a one-shot batch job. It validates its configuration,
//! checks inputs and outputs, does its work and returns a serializable
//! report. Progress lines such as `Adding <file>` go through the
//! [`OutputFormatter`](crate::output::OutputFormatter) the operation was
//! created with.

pub mod merge;
pub mod reorder;
pub mod split;

pub use merge::{MergeReport, MergedInput, Merger};
pub use reorder::{ReorderReport, Reorderer};
pub use split::{SplitChapter, SplitReport, Splitter};
