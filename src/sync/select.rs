//! Agent selection.

use crate::core::SyncError;
use crate::manifest::{AgentConfig, Manifest};
use strsim::levenshtein;

/// Maximum edit distance, as a percentage of the requested name's length, for
/// a "did you mean" suggestion.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Pick the agents a run processes, ordered by name.
///
/// - With `requested`, exactly that agent, whether or not it is enabled.
/// - Otherwise, every agent with `enabled = true`.
///
/// # Errors
///
/// [`SyncError::UnknownAgent`] when `requested` is not declared.
pub fn select_agents<'a>(
    manifest: &'a Manifest,
    requested: Option<&str>,
) -> Result<Vec<(&'a str, &'a AgentConfig)>, SyncError> {
    match requested {
        Some(name) => match manifest.agents.get_key_value(name) {
            Some((key, agent)) => Ok(vec![(key.as_str(), agent)]),
            None => Err(SyncError::UnknownAgent {
                name: name.to_string(),
                suggestion: closest_name(name, manifest.agents.keys().map(String::as_str)),
            }),
        },
        None => Ok(manifest
            .agents
            .iter()
            .filter(|(_, agent)| agent.enabled)
            .map(|(name, agent)| (name.as_str(), agent))
            .collect()),
    }
}

fn closest_name<'a>(target: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let max_distance = (target.len() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);
    candidates
        .map(|candidate| (candidate, levenshtein(target, candidate)))
        .filter(|(_, distance)| *distance <= max_distance)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate.to_string())
}
