//! Applying a [`SyncPlan`] to the filesystem.
//!
//! Agents are independent once conflicts have been ruled out, so each agent's
//! writes run on their own blocking task. Within an agent, actions run in plan
//! order and the first write or backup failure stops that agent only.

use crate::core::SyncError;
use crate::manifest::BackupStyle;
use crate::sync::backup::create_backup;
use crate::sync::plan::{ActionKind, AgentPlan, SyncPlan};
use crate::utils::{atomic_write, ensure_parent_dir};
use anyhow::Result;
use futures::future::join_all;
use std::path::PathBuf;
use tracing::{debug, info};

/// Backup behaviour for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupPolicy {
    /// Copy existing destinations aside before overwriting
    pub enabled: bool,
    /// Naming scheme for the copies
    pub style: BackupStyle,
}

/// What happened to one planned action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedAction {
    /// Destination file
    pub destination: PathBuf,
    /// Planned effect
    pub kind: ActionKind,
    /// Backup made before overwriting, if any
    pub backup: Option<PathBuf>,
}

/// Result of applying one agent's plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOutcome {
    /// Agent name
    pub agent: String,
    /// Actions completed, in order
    pub applied: Vec<AppliedAction>,
    /// Write or backup failure that stopped this agent
    pub failure: Option<SyncError>,
}

impl AgentOutcome {
    /// Files actually written (created or overwritten).
    #[must_use]
    pub fn written(&self) -> usize {
        self.applied.iter().filter(|a| a.kind != ActionKind::Unchanged).count()
    }
}

/// Apply every non-skipped agent plan, one blocking task per agent.
///
/// Outcomes are returned in plan order regardless of completion order.
///
/// # Errors
///
/// Only fails if a worker task panics or is cancelled; filesystem failures
/// are reported per agent in [`AgentOutcome::failure`].
pub async fn apply_plan(plan: &SyncPlan, policy: BackupPolicy) -> Result<Vec<AgentOutcome>> {
    let tasks = plan.agents.iter().filter(|a| !a.skipped).cloned().map(|agent_plan| {
        tokio::task::spawn_blocking(move || apply_agent(&agent_plan, policy))
    });

    let mut outcomes = Vec::new();
    for joined in join_all(tasks).await {
        outcomes.push(joined?);
    }
    Ok(outcomes)
}

/// Apply one agent's actions in order, stopping at the first failure.
pub fn apply_agent(plan: &AgentPlan, policy: BackupPolicy) -> AgentOutcome {
    let mut outcome = AgentOutcome {
        agent: plan.agent.clone(),
        applied: Vec::with_capacity(plan.actions.len()),
        failure: None,
    };

    for action in &plan.actions {
        let destination = &action.destination;

        if action.kind == ActionKind::Unchanged {
            debug!("{} is up to date", destination.display());
            outcome.applied.push(AppliedAction {
                destination: destination.clone(),
                kind: action.kind,
                backup: None,
            });
            continue;
        }

        let mut backup = None;
        if action.kind == ActionKind::Overwrite && policy.enabled && destination.is_file() {
            match create_backup(destination, policy.style) {
                Ok(path) => backup = Some(path),
                Err(e) => {
                    outcome.failure = Some(SyncError::BackupFailed {
                        path: destination.display().to_string(),
                        reason: format!("{e:#}"),
                    });
                    break;
                }
            }
        }

        let written = ensure_parent_dir(destination)
            .and_then(|()| atomic_write(destination, action.content.as_bytes()));
        if let Err(e) = written {
            outcome.failure = Some(SyncError::WriteError {
                path: destination.display().to_string(),
                reason: format!("{e:#}"),
            });
            break;
        }

        info!("Wrote {} ({})", destination.display(), action.kind);
        outcome.applied.push(AppliedAction {
            destination: destination.clone(),
            kind: action.kind,
            backup,
        });
    }

    outcome
}
