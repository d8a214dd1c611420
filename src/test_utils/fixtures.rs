//! Test fixtures for manifests and markdown content.

use crate::manifest::{Manifest, ManifestFormat};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Builder for manifest TOML.
///
/// Agent bodies are raw TOML appended after the `[agents.<name>]` header, so
/// a test can add `detect`, `strategy` or `[agents.<name>.targets.<cat>]`
/// tables verbatim.
#[derive(Clone, Debug)]
pub struct ManifestFixture {
    content_dir: String,
    settings: Option<String>,
    lists: Vec<(&'static str, Vec<String>)>,
    agents: Vec<String>,
}

impl ManifestFixture {
    /// Start a manifest with the given `content_dir`.
    pub fn new(content_dir: &str) -> Self {
        Self {
            content_dir: content_dir.to_string(),
            settings: None,
            lists: Vec::new(),
            agents: Vec::new(),
        }
    }

    /// Raw body of the `[settings]` table.
    pub fn settings(mut self, body: &str) -> Self {
        self.settings = Some(body.to_string());
        self
    }

    /// `rules.files`
    pub fn rules(self, files: &[&str]) -> Self {
        self.list("rules", files)
    }

    /// `workflows.files`
    pub fn workflows(self, files: &[&str]) -> Self {
        self.list("workflows", files)
    }

    /// `prompts.files`
    pub fn prompts(self, files: &[&str]) -> Self {
        self.list("prompts", files)
    }

    fn list(mut self, category: &'static str, files: &[&str]) -> Self {
        self.lists.push((category, files.iter().map(|f| (*f).to_string()).collect()));
        self
    }

    /// Declare an agent. `body` is raw TOML placed after its header.
    pub fn agent(mut self, name: &str, enabled: bool, body: &str) -> Self {
        self.agents.push(format!("[agents.{name}]\nenabled = {enabled}\n{body}\n"));
        self
    }

    /// Render the manifest as TOML.
    pub fn to_toml(&self) -> String {
        let mut out = format!("content_dir = {:?}\n", self.content_dir);
        if self.agents.is_empty() {
            out.push_str("agents = {}\n");
        }
        if let Some(settings) = &self.settings {
            out.push_str(&format!("\n[settings]\n{settings}\n"));
        }
        for (category, files) in &self.lists {
            out.push_str(&format!("\n[{category}]\nfiles = {files:?}\n"));
        }
        for agent in &self.agents {
            out.push('\n');
            out.push_str(agent);
        }
        out
    }

    /// Parse with paths anchored at `/project`.
    pub fn build(&self) -> Manifest {
        self.build_in(Path::new("/project"))
    }

    /// Parse with paths anchored at `dir`.
    pub fn build_in(&self, dir: &Path) -> Manifest {
        Manifest::parse(&self.to_toml(), ManifestFormat::Toml, &dir.join("agent-sync.toml"), dir.to_path_buf())
            .unwrap_or_else(|e| panic!("fixture manifest must parse: {e:#}\n{}", self.to_toml()))
    }

    /// Write `agent-sync.toml` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("agent-sync.toml");
        fs::write(&path, self.to_toml())?;
        Ok(path)
    }
}

/// A markdown source document for tests.
#[derive(Clone, Debug)]
pub struct MarkdownFixture {
    /// Path relative to `content_dir`
    pub path: String,
    /// Full file content
    pub content: String,
}

impl MarkdownFixture {
    /// Rule with `trigger` and `description` frontmatter.
    pub fn rule(name: &str, trigger: &str) -> Self {
        Self {
            path: format!("rules/{name}.md"),
            content: format!(
                "---\ntrigger: {trigger}\ndescription: {name} rules\n---\n\n# {name}\n\nFollow the {name} conventions.\n"
            ),
        }
    }

    /// Plain document without frontmatter.
    pub fn plain(path: &str, body: &str) -> Self {
        Self {
            path: path.to_string(),
            content: body.to_string(),
        }
    }

    /// Write under `content_root`, creating parent directories.
    pub fn write_to(&self, content_root: &Path) -> Result<PathBuf> {
        let path = content_root.join(&self.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}
