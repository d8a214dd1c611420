//! Manifest and content validation.
//!
//! Used both by `agent-sync validate` and by `agent-sync --validate`, which
//! runs the same checks before syncing and aborts if any error is found.
//!
//! # Errors versus warnings
//!
//! | Finding | Severity |
//! |---------|----------|
//! | manifest does not parse / missing key | error |
//! | listed source file missing | error |
//! | target for an unknown category | error |
//! | unterminated or non-mapping frontmatter | error |
//! | two targets share a destination | error |
//! | markdown under `content_dir` not referenced | warning |
//! | agent with no targets | warning |
//! | target whose category lists no files | warning |
//!
//! `--strict` promotes warnings to errors.

pub mod command;
mod executor;
pub mod results;
pub mod validators;

pub use command::{OutputFormat, ValidateCommand};
pub use executor::{print_results, run_validation};
pub use results::ValidationResults;
