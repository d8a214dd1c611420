//! Command-line interface for agent-sync.
//!
//! With no subcommand the tool syncs; flags pick the agent and mode:
//!
//! ```bash
//! agent-sync                      # sync every enabled agent
//! agent-sync --agent claude       # only claude, even if disabled
//! agent-sync --dry-run            # print the plan, write nothing
//! agent-sync --list               # agents, enabled flag, detection
//! agent-sync --validate           # validate, then sync if clean
//! agent-sync validate --strict    # validate only
//! ```
//!
//! # Environment
//!
//! - `AGENT_SYNC_MANIFEST`: manifest path, same as `--manifest`
//! - `AGENT_SYNC_NO_BACKUP`: disable backups, same as `--no-backup`
//! - `RUST_LOG`: overrides the log filter chosen by `--debug`

pub mod list;
pub mod sync;
pub mod validate;

use crate::detect::{Probe, SystemProbe};
use crate::manifest::{Manifest, find_manifest_with_optional};
use crate::sync::SyncOptions;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

pub use self::sync::SyncCommand;
pub use validate::ValidateCommand;

/// Sync shared rules, workflows and prompts into AI coding-agent tools.
#[derive(Parser, Debug)]
#[command(name = "agent-sync", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Sync only this agent (even if it is disabled)
    #[arg(long, value_name = "NAME")]
    agent: Option<String>,

    /// Report planned actions and write nothing
    #[arg(long)]
    dry_run: bool,

    /// Run the validator before syncing and abort if it fails
    #[arg(long)]
    validate: bool,

    /// Print every agent with its enabled flag and detection result, then exit
    #[arg(long, conflicts_with_all = ["dry_run", "validate", "auto"])]
    list: bool,

    /// Emit a per-file trace to stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Path to the manifest (default: search upward from the current directory)
    #[arg(long, global = true, env = "AGENT_SYNC_MANIFEST", value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Skip selected agents whose detection rule does not match
    #[arg(long)]
    auto: bool,

    /// Do not back up files before overwriting them
    #[arg(long, env = "AGENT_SYNC_NO_BACKUP", value_parser = clap::builder::FalseyValueParser::new())]
    no_backup: bool,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the manifest and its content without writing anything
    Validate(ValidateCommand),
}

impl Cli {
    /// Whether `--debug` was given.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Default log filter directive when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_directive(&self) -> &'static str {
        if self.debug { "agent_sync=debug" } else { "warn" }
    }

    /// Run against the real system.
    pub async fn execute(self) -> Result<()> {
        self.execute_with_probe(&SystemProbe).await
    }

    /// Run with a custom detection probe.
    pub async fn execute_with_probe(self, probe: &dyn Probe) -> Result<()> {
        let manifest_path = find_manifest_with_optional(self.manifest.clone())?;
        debug!("Using manifest {}", manifest_path.display());

        if let Some(Commands::Validate(cmd)) = self.command {
            return cmd.execute(Some(manifest_path), self.quiet);
        }

        if self.list {
            let manifest = Manifest::load(&manifest_path)?;
            list::print_listing(&list::list_agents(&manifest, probe));
            return Ok(());
        }

        SyncCommand {
            options: SyncOptions {
                agent: self.agent,
                dry_run: self.dry_run,
                auto: self.auto,
                no_backup: self.no_backup,
            },
            validate_first: self.validate,
            quiet: self.quiet,
        }
        .execute(&manifest_path, probe)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "agent-sync",
            "--agent",
            "claude",
            "--dry-run",
            "--auto",
            "--no-backup",
            "--manifest",
            "m.toml",
        ])
        .unwrap();

        assert_eq!(cli.agent.as_deref(), Some("claude"));
        assert!(cli.dry_run && cli.auto && cli.no_backup);
        assert_eq!(cli.manifest, Some(PathBuf::from("m.toml")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_validate_subcommand() {
        let cli = Cli::try_parse_from(["agent-sync", "validate", "--strict", "--format", "json"]).unwrap();
        match cli.command {
            Some(Commands::Validate(cmd)) => {
                assert!(cmd.strict);
                assert_eq!(cmd.format, validate::OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_list_conflicts_with_dry_run() {
        assert!(Cli::try_parse_from(["agent-sync", "--list", "--dry-run"]).is_err());
    }

    #[test]
    fn test_log_directive() {
        let cli = Cli::try_parse_from(["agent-sync", "--debug"]).unwrap();
        assert_eq!(cli.log_directive(), "agent_sync=debug");
        let cli = Cli::try_parse_from(["agent-sync"]).unwrap();
        assert_eq!(cli.log_directive(), "warn");
    }
}
