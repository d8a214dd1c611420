//! Human-readable run reports.
//!
//! Dry-run and real runs print action lines through the same
//! [`format_action`], so the two reports list identical actions.

use crate::detect::Detection;
use crate::sync::apply::AgentOutcome;
use crate::sync::plan::{ActionKind, AgentPlan, SyncPlan, WriteAction};
use crate::utils::platform::normalize_path_separator;
use colored::Colorize;

/// Plain-text description of one action:
/// `<kind> <category>: <sources> -> <destination> [<format>, stripped|kept]`.
#[must_use]
pub fn format_action(action: &WriteAction) -> String {
    let sources = if action.sources.is_empty() {
        "(no sources)".to_string()
    } else {
        action.sources.iter().map(|p| normalize_path_separator(p)).collect::<Vec<_>>().join(", ")
    };

    format!(
        "{:<9} {}: {} -> {} [{}, {}]",
        action.kind.to_string(),
        action.category,
        sources,
        normalize_path_separator(&action.destination),
        action.format,
        if action.stripped { "stripped" } else { "kept" }
    )
}

fn mark(kind: ActionKind) -> colored::ColoredString {
    match kind {
        ActionKind::Create => "+".green(),
        ActionKind::Overwrite => "~".yellow(),
        ActionKind::Unchanged => "=".dimmed(),
    }
}

fn agent_header(plan: &AgentPlan) -> String {
    let detection = match &plan.detection {
        Detection::Detected(how) => format!("detected via {how}"),
        Detection::NoRule => "no detection rule".to_string(),
        Detection::NotDetected => "not detected".to_string(),
    };
    format!("{} ({detection})", plan.agent.bold())
}

/// Print the planned actions of every agent.
///
/// With `quiet`, only warnings and per-file issues are printed.
pub fn print_plan(plan: &SyncPlan, dry_run: bool, quiet: bool) {
    if dry_run && !quiet {
        println!("{}", "Dry run: no files will be written".cyan().bold());
    }

    for agent in &plan.agents {
        if !quiet {
            println!("{}", agent_header(agent));
        }
        for warning in &agent.warnings {
            println!("  {} {warning}", "⚠".yellow());
        }
        if agent.skipped {
            if !quiet {
                println!("  {} skipped (--auto)", "-".dimmed());
            }
            continue;
        }
        if !quiet {
            for action in &agent.actions {
                println!("  {} {}", mark(action.kind), format_action(action));
            }
            if agent.actions.is_empty() {
                println!("  {}", "nothing to write".dimmed());
            }
        }
        for issue in &agent.issues {
            println!("  {} {issue}", "✗".red());
        }
    }
}

/// Print what the real run did, agent by agent.
pub fn print_outcomes(outcomes: &[AgentOutcome], quiet: bool) {
    for outcome in outcomes {
        if !quiet {
            for applied in outcome.applied.iter().filter(|a| a.backup.is_some()) {
                if let Some(backup) = &applied.backup {
                    println!(
                        "  {} backed up {} to {}",
                        "↺".cyan(),
                        normalize_path_separator(&applied.destination),
                        normalize_path_separator(backup)
                    );
                }
            }
        }
        match &outcome.failure {
            Some(failure) => {
                println!("{} {}: {failure}", "✗".red(), outcome.agent.bold());
            }
            None if !quiet => {
                println!(
                    "{} {}: {} written, {} unchanged",
                    "✓".green(),
                    outcome.agent.bold(),
                    outcome.written(),
                    outcome.applied.len() - outcome.written()
                );
            }
            None => {}
        }
    }
}

/// Closing line for a dry run.
pub fn print_dry_run_summary(plan: &SyncPlan, quiet: bool) {
    if quiet {
        return;
    }
    let total = plan.actions().count();
    let changes = plan.actions().filter(|a| a.kind != ActionKind::Unchanged).count();
    println!("{} {changes} of {total} file(s) would change", "Summary:".bold());
}
