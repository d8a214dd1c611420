//! Planning: compute every destination write before touching the disk.
//!
//! A [`SyncPlan`] is the single source of truth for both dry-run output and
//! the real run, so the two can never disagree.

use crate::core::SyncError;
use crate::detect::{Detection, Probe, detect_agent};
use crate::manifest::{Category, Manifest, TargetFormat};
use crate::sync::gather::ContentSet;
use crate::sync::render::render_target;
use crate::utils::platform::destination_key;
use anyhow::Result;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

/// What applying an action does to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Destination does not exist yet
    Create,
    /// Destination exists with different content (backed up first if enabled)
    Overwrite,
    /// Destination already holds exactly this content; nothing is written
    Unchanged,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Overwrite => f.write_str("overwrite"),
            Self::Unchanged => f.write_str("unchanged"),
        }
    }
}

/// One destination file to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAction {
    /// Owning agent
    pub agent: String,
    /// Category being written
    pub category: Category,
    /// Destination file
    pub destination: PathBuf,
    /// Source documents, in order
    pub sources: Vec<PathBuf>,
    /// Target format
    pub format: TargetFormat,
    /// Whether frontmatter was stripped
    pub stripped: bool,
    /// Effect on the destination
    pub kind: ActionKind,
    /// Rendered content
    pub content: String,
}

impl WriteAction {
    /// `agent/category`, used to name owners in conflict errors.
    #[must_use]
    pub fn owner(&self) -> String {
        format!("{}/{}", self.agent, self.category)
    }
}

/// Everything planned for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPlan {
    /// Agent name
    pub agent: String,
    /// Detection outcome
    pub detection: Detection,
    /// Skipped by `--auto` because detection failed
    pub skipped: bool,
    /// Writes in category order
    pub actions: Vec<WriteAction>,
    /// Per-file problems affecting this agent's targets
    pub issues: Vec<SyncError>,
    /// Non-fatal notes (undetected agent, unknown target keys)
    pub warnings: Vec<String>,
}

/// The ordered per-agent plans for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Plans in selection order
    pub agents: Vec<AgentPlan>,
}

impl SyncPlan {
    /// Every action across agents, in plan order.
    pub fn actions(&self) -> impl Iterator<Item = &WriteAction> {
        self.agents.iter().flat_map(|a| a.actions.iter())
    }

    /// Number of distinct per-file issues across agents.
    ///
    /// A missing source shared by several agents is listed under each of
    /// them but counted once.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.agents
            .iter()
            .flat_map(|a| a.issues.iter().map(ToString::to_string))
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Build the plan for `selected` agents.
///
/// `auto` skips agents whose detection rule does not match; otherwise an
/// undetected agent only gets a warning.
///
/// # Errors
///
/// - [`SyncError::ConfigError`] when a path cannot be expanded
/// - [`SyncError::DestinationConflict`] when two actions share a destination
pub fn build_plan(
    manifest: &Manifest,
    selected: &[(&str, &crate::manifest::AgentConfig)],
    content: &ContentSet,
    probe: &dyn Probe,
    auto: bool,
) -> Result<SyncPlan> {
    let mut plan = SyncPlan::default();

    for &(name, agent) in selected {
        let detection = detect_agent(agent, probe);
        let mut agent_plan = AgentPlan {
            agent: name.to_string(),
            skipped: auto && !detection.is_detected(),
            detection,
            actions: Vec::new(),
            issues: Vec::new(),
            warnings: Vec::new(),
        };

        if !agent_plan.detection.is_detected() {
            let note = format!("agent '{name}' was not detected on this system");
            warn!("{note}");
            agent_plan.warnings.push(note);
        }
        if agent_plan.skipped {
            debug!("Skipping undetected agent '{name}' (auto mode)");
            plan.agents.push(agent_plan);
            continue;
        }

        for key in agent.unknown_target_keys() {
            let note = format!("agent '{name}' has target for unknown category '{key}'; ignored");
            warn!("{note}");
            agent_plan.warnings.push(note);
        }

        for (category, target) in agent.known_targets() {
            let destination = manifest.resolve_target_path(target).map_err(|e| SyncError::ConfigError {
                message: format!("agents.{name}.targets.{category}.path: {e:#}"),
            })?;

            let Some(gathered) = content.get(category) else {
                continue;
            };
            agent_plan.issues.extend(gathered.issues.iter().cloned());

            let (files, render_issues) =
                render_target(target, agent.strategy, &destination, &gathered.documents);
            agent_plan.issues.extend(render_issues);

            for file in files {
                let kind = classify(&file.destination, &file.content);
                debug!(
                    "Planned {} {} ({} source(s), {kind})",
                    category,
                    file.destination.display(),
                    file.sources.len()
                );
                agent_plan.actions.push(WriteAction {
                    agent: name.to_string(),
                    category,
                    destination: file.destination,
                    sources: file.sources,
                    format: target.format,
                    stripped: target.strip_frontmatter,
                    kind,
                    content: file.content,
                });
            }
        }

        plan.agents.push(agent_plan);
    }

    check_conflicts(&plan)?;
    Ok(plan)
}

fn classify(destination: &std::path::Path, content: &str) -> ActionKind {
    match std::fs::read(destination) {
        Ok(existing) if existing == content.as_bytes() => ActionKind::Unchanged,
        Ok(_) => ActionKind::Overwrite,
        Err(_) if destination.exists() => ActionKind::Overwrite,
        Err(_) => ActionKind::Create,
    }
}

/// Reject two actions that write the same destination.
///
/// Paths are compared by [`destination_key`], so `out/x.md` and
/// `out/../out/x.md` collide.
pub fn check_conflicts(plan: &SyncPlan) -> Result<(), SyncError> {
    let mut owners: HashMap<PathBuf, &WriteAction> = HashMap::new();
    for action in plan.actions() {
        if let Some(first) = owners.insert(destination_key(&action.destination), action) {
            return Err(SyncError::DestinationConflict {
                path: action.destination.display().to_string(),
                first: first.owner(),
                second: action.owner(),
            });
        }
    }
    Ok(())
}
