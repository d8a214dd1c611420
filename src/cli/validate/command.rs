//! Command-line arguments for `agent-sync validate`.

use clap::Args;

/// Check the manifest and its content without writing anything.
///
/// # Checks
///
/// - the manifest parses and has `content_dir` and `agents`
/// - every listed source file exists under `content_dir`
/// - every target names a known category
/// - every frontmatter block is a valid key-value mapping
/// - no two targets write the same destination
///
/// Every problem is reported, not just the first.
///
/// # Examples
///
/// ```bash
/// agent-sync validate
/// agent-sync validate --strict
/// agent-sync validate --format json
/// ```
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateCommand {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// How validation results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Marks and messages for humans
    #[default]
    Text,
    /// A single pretty-printed `ValidationResults` object
    Json,
}
