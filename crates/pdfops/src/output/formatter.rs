//! Progress and result lines for the command layer.
//!
//! Progress lines (`Adding scan-1.pdf`, `Writing to intro.pdf pages 1 to 4`)
//! and summaries go to stdout. Warnings go to stderr so they never end up in
//! a JSON report.
//!
//! ```
//! use pdfops::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::default();
//! formatter.info("Adding scan-1.pdf");
//! formatter.success("Wrote book.pdf");
//! ```

use std::io::{self, IsTerminal};

use crate::config::OutputOptions;

/// How much the formatter prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Warnings only.
    Quiet,
    /// Progress lines and summaries.
    #[default]
    Normal,
    /// Everything, including per-file details.
    Verbose,
}

/// Kind of a printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Plain progress line.
    Info,
    /// Finished operation.
    Success,
    /// Problem that does not stop the operation.
    Warning,
    /// Verbose-only detail.
    Debug,
}

impl MessageLevel {
    /// Least verbosity at which lines of this level are printed.
    fn threshold(self) -> Verbosity {
        match self {
            Self::Warning => Verbosity::Quiet,
            Self::Info | Self::Success => Verbosity::Normal,
            Self::Debug => Verbosity::Verbose,
        }
    }

    /// Line prefix and ANSI color.
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Info => ("", ""),
            Self::Success => ("✓ ", "\x1b[32m"),
            Self::Warning => ("⚠ ", "\x1b[33m"),
            Self::Debug => ("→ ", "\x1b[36m"),
        }
    }
}

/// Prints progress lines according to a [`Verbosity`].
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    verbosity: Verbosity,
    colored: bool,
}

impl OutputFormatter {
    /// Create a formatter printing at `verbosity`.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            colored: io::stdout().is_terminal() && std::env::var_os("TERM").is_some(),
        }
    }

    /// Formatter matching the shared options of an operation.
    ///
    /// JSON mode prints nothing but warnings; a dry run is reported even when
    /// quiet.
    pub fn from_options(options: &OutputOptions) -> Self {
        let verbosity = if !options.should_print() {
            Verbosity::Quiet
        } else if options.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Self::new(verbosity)
    }

    /// Formatter printing warnings only.
    pub fn quiet() -> Self {
        Self::new(Verbosity::Quiet)
    }

    /// Formatter printing everything.
    pub fn verbose() -> Self {
        Self::new(Verbosity::Verbose)
    }

    /// Current verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Progress line.
    pub fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }

    /// Completion line.
    pub fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    /// Printed even in quiet mode, on stderr.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Verbose only.
    pub fn debug(&self, message: &str) {
        self.emit(MessageLevel::Debug, message);
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        if self.verbosity < level.threshold() {
            return;
        }

        let (prefix, color) = level.style();
        let line = if self.colored && !color.is_empty() {
            format!("{color}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        };

        if level == MessageLevel::Warning {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Header line preceded by a blank line.
    pub fn section(&self, title: &str) {
        if self.should_print() {
            println!("\n{title}");
        }
    }

    /// `label: value` line, verbose only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.is_verbose() {
            println!("  {label}: {value}");
        }
    }

    /// Numbered line, `index` counts from 1.
    pub fn list_item(&self, index: usize, message: &str) {
        if self.should_print() {
            println!("  {index}. {message}");
        }
    }

    /// Empty line, unless quiet.
    pub fn blank_line(&self) {
        if self.should_print() {
            println!();
        }
    }

    /// Whether progress lines are printed.
    pub fn should_print(&self) -> bool {
        self.verbosity >= Verbosity::Normal
    }

    /// Whether verbose details are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}
