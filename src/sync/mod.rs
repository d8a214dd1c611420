//! The sync pipeline.
//!
//! ```text
//! select agents -> gather documents -> plan writes -> apply (or report)
//! ```
//!
//! - [`select`] picks agents by `--agent` or the `enabled` flag.
//! - [`gather`] reads each category's documents once, shared by all agents.
//! - [`render`] turns a target and its documents into file contents.
//! - [`plan`] classifies each destination and rejects collisions.
//! - [`apply`] writes the plan, backing up overwritten files.
//! - [`report`] prints plans and outcomes.

pub mod apply;
pub mod backup;
pub mod gather;
pub mod plan;
pub mod render;
pub mod report;
pub mod select;

pub use apply::{AgentOutcome, BackupPolicy, apply_plan};
pub use gather::ContentSet;
pub use plan::{ActionKind, AgentPlan, SyncPlan, WriteAction, build_plan};
pub use select::select_agents;

use crate::core::SyncError;
use crate::detect::Probe;
use crate::manifest::{Category, Manifest};
use anyhow::Result;
use std::collections::BTreeSet;
use tracing::debug;

/// Options for one sync invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Sync only this agent
    pub agent: Option<String>,
    /// Plan and report without writing
    pub dry_run: bool,
    /// Skip agents whose detection rule does not match
    pub auto: bool,
    /// Disable backups regardless of the manifest setting
    pub no_backup: bool,
}

/// Outcome of [`run_sync`]. `outcomes` is empty for a dry run.
#[derive(Debug, Clone)]
pub struct SyncRun {
    /// The plan that was reported or applied
    pub plan: SyncPlan,
    /// Per-agent apply results, in plan order
    pub outcomes: Vec<AgentOutcome>,
}

impl SyncRun {
    /// Turn collected per-file and write failures into a final error.
    ///
    /// # Errors
    ///
    /// [`SyncError::SyncIncomplete`] if any agent had an issue or failure.
    pub fn into_result(self) -> Result<SyncRun, SyncError> {
        let failed_files = self.plan.issue_count();
        let failed_writes = self.outcomes.iter().filter(|o| o.failure.is_some()).count();
        if failed_files > 0 || failed_writes > 0 {
            return Err(SyncError::SyncIncomplete {
                failed_files,
                failed_writes,
            });
        }
        Ok(self)
    }
}

/// Plan a sync and, unless `dry_run`, apply it.
///
/// Only configuration-level problems return `Err`; per-file issues and write
/// failures are recorded in the returned [`SyncRun`].
///
/// # Errors
///
/// - [`SyncError::UnknownAgent`] for an undeclared `--agent`
/// - [`SyncError::ConfigError`] / [`SyncError::DestinationConflict`] from planning
pub async fn run_sync(manifest: &Manifest, options: &SyncOptions, probe: &dyn Probe) -> Result<SyncRun> {
    let selected = select_agents(manifest, options.agent.as_deref())?;
    debug!("Selected {} agent(s)", selected.len());

    let categories: BTreeSet<Category> =
        selected.iter().flat_map(|(_, agent)| agent.known_targets().map(|(c, _)| c)).collect();
    let content = ContentSet::gather(manifest, categories)?;

    let plan = build_plan(manifest, &selected, &content, probe, options.auto)?;
    if options.dry_run {
        return Ok(SyncRun {
            plan,
            outcomes: Vec::new(),
        });
    }

    let policy = backup_policy(manifest, options);
    let outcomes = apply_plan(&plan, policy).await?;
    Ok(SyncRun {
        plan,
        outcomes,
    })
}

/// Effective backup behaviour: the manifest setting, unless `--no-backup`.
#[must_use]
pub fn backup_policy(manifest: &Manifest, options: &SyncOptions) -> BackupPolicy {
    BackupPolicy {
        enabled: manifest.settings.backup && !options.no_backup,
        style: manifest.settings.backup_style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeProbe, ManifestFixture};
    use std::fs;
    use tempfile::tempdir;

    fn project() -> (tempfile::TempDir, Manifest) {
        crate::test_utils::init_test_logging(None);
        let temp = tempdir().unwrap();
        let content = temp.path().join("content/rules");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("a.md"), "---\ntrigger: always\n---\nHello\n").unwrap();
        fs::write(content.join("b.md"), "World\n").unwrap();

        let manifest = ManifestFixture::new("content")
            .rules(&["rules/a.md", "rules/b.md"])
            .agent(
                "x",
                true,
                "[agents.x.targets.rules]\npath = \"out.md\"\nformat = \"merged\"\nstrip_frontmatter = true",
            )
            .build_in(temp.path());
        (temp, manifest)
    }

    #[tokio::test]
    async fn test_merged_scenario() {
        let (temp, manifest) = project();
        let run = run_sync(&manifest, &SyncOptions::default(), &FakeProbe::default()).await.unwrap();
        assert!(run.into_result().is_ok());
        assert_eq!(fs::read_to_string(temp.path().join("out.md")).unwrap(), "Hello\n\nWorld");
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing_and_matches_real_run() {
        let (temp, manifest) = project();
        let dry = run_sync(
            &manifest,
            &SyncOptions {
                dry_run: true,
                ..Default::default()
            },
            &FakeProbe::default(),
        )
        .await
        .unwrap();
        assert!(dry.outcomes.is_empty());
        assert!(!temp.path().join("out.md").exists());

        let real = run_sync(&manifest, &SyncOptions::default(), &FakeProbe::default()).await.unwrap();
        assert_eq!(dry.plan, real.plan);
    }

    #[tokio::test]
    async fn test_second_run_is_unchanged_without_backups() {
        let (temp, manifest) = project();
        run_sync(&manifest, &SyncOptions::default(), &FakeProbe::default()).await.unwrap();
        let second = run_sync(&manifest, &SyncOptions::default(), &FakeProbe::default()).await.unwrap();

        assert!(second.plan.actions().all(|a| a.kind == ActionKind::Unchanged));
        let backups = fs::read_dir(temp.path())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().ends_with(".bak"))
            .count();
        assert_eq!(backups, 0);
    }

    #[tokio::test]
    async fn test_unknown_agent_aborts() {
        let (_temp, manifest) = project();
        let options = SyncOptions {
            agent: Some("ghost".into()),
            ..Default::default()
        };
        let err = run_sync(&manifest, &options, &FakeProbe::default()).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<SyncError>(), Some(SyncError::UnknownAgent { .. })));
    }

    #[test]
    fn test_no_backup_overrides_manifest() {
        let (_temp, manifest) = project();
        assert!(backup_policy(&manifest, &SyncOptions::default()).enabled);
        let options = SyncOptions {
            no_backup: true,
            ..Default::default()
        };
        assert!(!backup_policy(&manifest, &options).enabled);
    }
}
