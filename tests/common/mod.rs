//! Shared harness for agent-sync integration tests.

#![allow(dead_code)]

use agent_sync::test_utils::{ManifestFixture, MarkdownFixture};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A throwaway project: a manifest, a `content/` tree and an `out/` area for
/// destinations, all inside one temp directory.
pub struct TestProject {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn content_path(&self) -> PathBuf {
        self.root.join("content")
    }

    pub fn write_manifest(&self, fixture: &ManifestFixture) -> PathBuf {
        fixture.write_to(&self.root).unwrap()
    }

    pub fn write_raw_manifest(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn write_content(&self, relative: &str, content: &str) {
        MarkdownFixture::plain(relative, content).write_to(&self.content_path()).unwrap();
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }

    /// Files under `dir` (relative to the project) whose name ends in `.bak`.
    pub fn backups_in(&self, dir: &str) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = fs::read_dir(self.root.join(dir))
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.path())
                    .filter(|p| p.to_string_lossy().ends_with(".bak"))
                    .collect()
            })
            .unwrap_or_default();
        found.sort();
        found
    }

    /// Every regular file under the project, relative, sorted.
    pub fn snapshot(&self) -> Vec<(PathBuf, String)> {
        let mut files: Vec<(PathBuf, String)> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let content = fs::read_to_string(e.path()).unwrap_or_default();
                (e.path().strip_prefix(&self.root).unwrap().to_path_buf(), content)
            })
            .collect();
        files.sort();
        files
    }

    /// The binary, run from the project root with colors and inherited
    /// agent-sync environment disabled.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("agent-sync").unwrap();
        cmd.current_dir(&self.root)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove(agent_sync::constants::MANIFEST_ENV)
            .env_remove(agent_sync::constants::NO_BACKUP_ENV);
        cmd
    }
}

/// The canonical two-document rules set: `a.md` with frontmatter and body
/// "Hello", `b.md` with body "World".
pub fn hello_world(project: &TestProject) {
    project.write_content("rules/a.md", "---\ntrigger: always\n---\nHello\n");
    project.write_content("rules/b.md", "World\n");
}

/// Manifest with one merged agent `x` writing `out/x.md` with stripping.
pub fn merged_manifest() -> ManifestFixture {
    ManifestFixture::new("content").rules(&["rules/a.md", "rules/b.md"]).agent(
        "x",
        true,
        "[agents.x.targets.rules]\npath = \"out/x.md\"\nformat = \"merged\"\nstrip_frontmatter = true",
    )
}
