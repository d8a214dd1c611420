//! Agent installation detection.
//!
//! Detection is a pure predicate over a [`Probe`], which abstracts the three
//! questions a [`DetectRule`] can ask: does a path exist, is a binary on
//! `PATH`, does a command exit zero. [`SystemProbe`] answers them against the
//! real system; tests substitute a fake.
//!
//! Detection is informational. It never gates a normal sync; only `--auto`
//! skips agents whose rule does not match.

use crate::manifest::{AgentConfig, DetectRule};
use crate::utils::platform;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Questions a detection rule may ask of the environment.
pub trait Probe: Send + Sync {
    /// Whether `path` exists.
    fn path_exists(&self, path: &Path) -> bool;

    /// Whether an executable called `name` is on `PATH`.
    fn binary_exists(&self, name: &str) -> bool;

    /// Whether the shell command exits zero.
    fn command_succeeds(&self, command: &str) -> bool;
}

/// [`Probe`] backed by the real filesystem, `PATH` and shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn binary_exists(&self, name: &str) -> bool {
        platform::command_exists(name)
    }

    fn command_succeeds(&self, command: &str) -> bool {
        let mut cmd = if platform::is_windows() {
            let mut c = Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command]);
            c
        };

        match cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null()).status() {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("Probe command '{command}' could not be started: {e}");
                false
            }
        }
    }
}

/// Outcome of evaluating an agent's detection rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// A check matched; the string says which one
    Detected(String),
    /// Every check failed
    NotDetected,
    /// The agent declares no rule and is assumed present
    NoRule,
}

impl Detection {
    /// Boolean view used by `--list` and `--auto`.
    #[must_use]
    pub fn is_detected(&self) -> bool {
        !matches!(self, Self::NotDetected)
    }
}

/// Evaluate an agent's rule. Checks run in order (paths, binary, command) and
/// stop at the first match.
pub fn detect_agent(agent: &AgentConfig, probe: &dyn Probe) -> Detection {
    match &agent.detect {
        Some(rule) if !rule.is_empty() => evaluate(rule, probe),
        _ => Detection::NoRule,
    }
}

fn evaluate(rule: &DetectRule, probe: &dyn Probe) -> Detection {
    for raw in &rule.paths {
        match platform::resolve_path(raw) {
            Ok(path) if probe.path_exists(&path) => {
                return Detection::Detected(format!("path {}", path.display()));
            }
            Ok(path) => debug!("Detection path {} does not exist", path.display()),
            Err(e) => debug!("Detection path '{raw}' could not be expanded: {e}"),
        }
    }

    if let Some(binary) = &rule.binary {
        if probe.binary_exists(binary) {
            return Detection::Detected(format!("binary {binary}"));
        }
        debug!("Detection binary '{binary}' not on PATH");
    }

    if let Some(command) = &rule.command {
        if probe.command_succeeds(command) {
            return Detection::Detected(format!("command `{command}`"));
        }
        debug!("Detection command '{command}' failed");
    }

    Detection::NotDetected
}
