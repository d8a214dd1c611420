//! Validation checks, one module per concern.
//!
//! Every check records its findings on a shared [`ValidationContext`] and
//! keeps going; nothing here stops at the first problem.

use crate::cli::validate::command::OutputFormat;
use crate::cli::validate::results::ValidationResults;
use crate::manifest::Manifest;
use colored::Colorize;
use std::path::PathBuf;

pub mod frontmatter;
pub mod manifest;
pub mod sources;
pub mod targets;

pub use frontmatter::validate_frontmatter;
pub use manifest::validate_manifest;
pub use sources::validate_sources;
pub use targets::validate_targets;

/// State shared by the checks that run after the manifest has loaded.
pub struct ValidationContext<'a> {
    /// The loaded manifest
    pub manifest: &'a Manifest,
    /// Resolved `content_dir`
    pub content_root: PathBuf,
    /// Output format; text progress is printed only for `Text`
    pub format: OutputFormat,
    /// Suppress progress lines
    pub quiet: bool,
    /// Accumulated results
    pub results: &'a mut ValidationResults,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        manifest: &'a Manifest,
        content_root: PathBuf,
        format: OutputFormat,
        quiet: bool,
        results: &'a mut ValidationResults,
    ) -> Self {
        Self {
            manifest,
            content_root,
            format,
            quiet,
            results,
        }
    }

    /// Record an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.results.errors.push(message.into());
    }

    /// Record a warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.results.warnings.push(message.into());
    }

    /// Print a progress line in text mode.
    pub fn print(&self, message: &str) {
        if self.format == OutputFormat::Text && !self.quiet {
            println!("{message}");
        }
    }

    /// Print `✓ label` or `✗ label` depending on `ok`.
    pub fn print_check(&self, ok: bool, label: &str) {
        if ok {
            self.print(&format!("{} {label}", "✓".green()));
        } else {
            self.print(&format!("{} {label}", "✗".red()));
        }
    }
}
