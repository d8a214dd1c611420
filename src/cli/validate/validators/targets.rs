//! Agent target validation: known categories and unique destinations.

use super::ValidationContext;
use crate::manifest::{Category, TargetFormat};
use crate::sync::gather::resolve_entry;
use crate::sync::render::individual_destination;
use crate::utils::platform::destination_key;
use std::collections::HashMap;
use std::path::PathBuf;

/// Check every agent's targets.
///
/// - Unknown category keys are errors.
/// - Two targets producing the same destination file are errors, whether or
///   not the agents are enabled.
/// - An agent with no targets, or a target whose category lists no files,
///   is a warning.
pub fn validate_targets(ctx: &mut ValidationContext<'_>) {
    let manifest = ctx.manifest;
    let mut category_errors = false;
    let mut owners: HashMap<PathBuf, String> = HashMap::new();
    let mut conflicts = Vec::new();

    for (name, agent) in &manifest.agents {
        if agent.targets.is_empty() {
            ctx.warning(format!("agent '{name}' has no targets"));
            continue;
        }

        for key in agent.unknown_target_keys() {
            category_errors = true;
            ctx.error(format!(
                "agent '{name}' targets unknown category '{key}' (expected one of: {})",
                known_category_names().join(", ")
            ));
        }

        for (category, target) in agent.known_targets() {
            let files = manifest.files_for(category);
            if files.is_empty() {
                ctx.warning(format!("agent '{name}' targets '{category}', which lists no files"));
            }

            let destination = match manifest.resolve_target_path(target) {
                Ok(path) => path,
                Err(e) => {
                    ctx.error(format!("agents.{name}.targets.{category}.path: {e:#}"));
                    continue;
                }
            };

            let outputs = match target.format {
                TargetFormat::Merged => vec![destination],
                TargetFormat::Individual => files
                    .iter()
                    .filter_map(|entry| resolve_entry(&ctx.content_root, entry).ok())
                    .flatten()
                    .map(|r| individual_destination(target, agent.strategy, &destination, &r.relative))
                    .collect(),
            };

            let owner = format!("{name}/{category}");
            for output in outputs {
                let key = destination_key(&output);
                if let Some(first) = owners.get(&key) {
                    conflicts.push(format!(
                        "destination {} is written by both {first} and {owner}",
                        output.display()
                    ));
                } else {
                    owners.insert(key, owner.clone());
                }
            }
        }
    }

    let unique = conflicts.is_empty();
    for conflict in conflicts {
        ctx.error(conflict);
    }

    ctx.results.targets_valid = !category_errors;
    ctx.results.destinations_unique = unique;
    ctx.print_check(!category_errors, "Targets reference known categories");
    ctx.print_check(unique, "Destinations are unique");
}

/// Categories named by a target key, for messages.
#[must_use]
pub fn known_category_names() -> Vec<&'static str> {
    Category::ALL.iter().map(|c| c.as_str()).collect()
}
