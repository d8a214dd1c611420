//! `agent-sync --list`: every declared agent with its enabled flag and
//! detection result.

use crate::detect::{Detection, Probe, detect_agent};
use crate::manifest::Manifest;
use colored::Colorize;

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentListing {
    pub name: String,
    pub enabled: bool,
    pub detection: Detection,
    pub description: String,
}

impl AgentListing {
    /// Boolean detection result as shown to the user.
    #[must_use]
    pub fn detected(&self) -> bool {
        self.detection.is_detected()
    }
}

/// Evaluate every agent, enabled or not, in name order.
pub fn list_agents(manifest: &Manifest, probe: &dyn Probe) -> Vec<AgentListing> {
    manifest
        .agents
        .iter()
        .map(|(name, agent)| AgentListing {
            name: name.clone(),
            enabled: agent.enabled,
            detection: detect_agent(agent, probe),
            description: agent.description.clone(),
        })
        .collect()
}

/// Print the listing as aligned columns.
pub fn print_listing(listing: &[AgentListing]) {
    if listing.is_empty() {
        println!("No agents declared");
        return;
    }

    let width = listing.iter().map(|l| l.name.len()).max().unwrap_or(0);
    println!("{}", "Agents".cyan().bold());
    for row in listing {
        let enabled = if row.enabled { "true".green() } else { "false".dimmed() };
        let detected = if row.detected() { "true".green() } else { "false".yellow() };
        let mut line = format!("  {:<width$}  enabled: {enabled:<5}  detected: {detected:<5}", row.name);
        if !row.description.is_empty() {
            line.push_str(&format!("  {}", row.description.dimmed()));
        }
        println!("{line}");
    }
    println!("{}: {} agent(s)", "Total".green().bold(), listing.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeProbe, ManifestFixture};

    #[test]
    fn test_lists_every_agent_with_detection() {
        let manifest = ManifestFixture::new("content")
            .agent("claude", true, "description = \"Claude\"\ndetect = { binary = \"claude\" }")
            .agent("cursor", false, "detect = [\"/opt/cursor\"]")
            .agent("plain", true, "")
            .build();
        let probe = FakeProbe::default().with_binary("claude");

        let listing = list_agents(&manifest, &probe);
        let rows: Vec<_> = listing.iter().map(|l| (l.name.as_str(), l.enabled, l.detected())).collect();
        assert_eq!(rows, vec![("claude", true, true), ("cursor", false, false), ("plain", true, true)]);
        assert_eq!(listing[0].description, "Claude");
    }
}
