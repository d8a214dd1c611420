//! agent-sync - distribute shared markdown content to AI coding-agent tools
//!
//! A single manifest lists rule, workflow and prompt documents and a set of
//! agents. Each agent maps those categories to a destination, either one
//! merged file or one file per source, optionally with YAML frontmatter
//! removed. agent-sync gathers the documents, renders each target, and writes
//! the results, backing up anything it overwrites.
//!
//! # Pipeline
//!
//! ```text
//! manifest load -> agent selection -> detection -> gather -> render -> plan -> apply
//! ```
//!
//! The plan is computed without touching the disk. `--dry-run` prints it;
//! a real run applies exactly that plan.
//!
//! # Modules
//!
//! - [`cli`] - argument parsing and the sync, list and validate commands
//! - [`core`] - [`SyncError`](core::SyncError), exit codes, user-facing errors
//! - [`manifest`] - manifest types, TOML/YAML loading, manifest discovery
//! - [`markdown`] - frontmatter splitting and metadata
//! - [`detect`] - agent installation detection
//! - [`sync`] - gathering, rendering, planning, backups and writing
//! - [`utils`] - path expansion and atomic file writes
//! - [`constants`] - shared names and formats
//!
//! # Manifest example
//!
//! ```toml
//! content_dir = "content"
//!
//! [rules]
//! files = ["rules/general.md", "rules/rust.md"]
//!
//! [agents.claude]
//! detect = { paths = ["~/.claude"], binary = "claude" }
//! targets.rules = { path = "~/.claude/CLAUDE.md", format = "merged", strip_frontmatter = true }
//!
//! [agents.windsurf]
//! targets.rules = { path = ".windsurf/rules", format = "individual" }
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod detect;
pub mod manifest;
pub mod markdown;
pub mod sync;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
