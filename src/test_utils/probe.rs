//! A scripted [`Probe`] for detection tests.

use crate::detect::Probe;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// [`Probe`] that answers from fixed sets. Everything not added is absent.
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    paths: HashSet<PathBuf>,
    binaries: HashSet<String>,
    commands: HashSet<String>,
}

impl FakeProbe {
    /// Make `path` exist.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }

    /// Put `name` on the fake `PATH`.
    pub fn with_binary(mut self, name: &str) -> Self {
        self.binaries.insert(name.to_string());
        self
    }

    /// Make `command` exit zero.
    pub fn with_command(mut self, command: &str) -> Self {
        self.commands.insert(command.to_string());
        self
    }
}

impl Probe for FakeProbe {
    fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    fn binary_exists(&self, name: &str) -> bool {
        self.binaries.contains(name)
    }

    fn command_succeeds(&self, command: &str) -> bool {
        self.commands.contains(command)
    }
}
