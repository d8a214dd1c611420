//! Manifest parsing for agent-sync.
//!
//! The manifest declares which markdown documents exist (grouped into the
//! `rules`, `workflows` and `prompts` categories) and which agent tools receive
//! them. Each agent maps categories to a [`TargetSpec`] describing where and how
//! the documents are written.
//!
//! # Basic Structure
//!
//! ```toml
//! content_dir = "content"
//!
//! [settings]
//! backup = true
//! backup_style = "timestamp"
//!
//! [rules]
//! files = ["rules/general.md", "rules/rust.md"]
//!
//! [workflows]
//! files = ["workflows/*.md"]
//!
//! [agents.claude]
//! description = "Claude Code"
//! detect = { paths = ["~/.claude"], binary = "claude" }
//!
//! [agents.claude.targets.rules]
//! path = "~/.claude/CLAUDE.md"
//! format = "merged"
//! strip_frontmatter = true
//!
//! [agents.cursor]
//! strategy = "cursor-mdc"
//! targets.rules = { path = ".cursor/rules", format = "individual" }
//! ```
//!
//! The same structure may be written as YAML (`.yaml` / `.yml`).
//!
//! # Paths
//!
//! - `content_dir` and relative target paths are anchored at the directory
//!   containing the manifest.
//! - `~/` and `$VAR` are expanded in both.
//! - File-list entries are relative to `content_dir` and may be glob patterns.
//!
//! # Loading
//!
//! [`Manifest::load`] parses and checks required keys only. Whether the listed
//! files exist is checked separately by the validator and at sync time.

pub mod helpers;
mod manifest_io;

#[cfg(test)]
mod manifest_tests;

pub use helpers::{find_manifest, find_manifest_from, find_manifest_with_optional};
pub use manifest_io::ManifestFormat;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A content category. Each category has its own file list in the manifest and
/// its own target per agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Behavioral rules
    Rules,
    /// Workflow checklists
    Workflows,
    /// Prompt templates
    Prompts,
}

impl Category {
    /// All categories in processing order.
    pub const ALL: [Self; 3] = [Self::Rules, Self::Workflows, Self::Prompts];

    /// The manifest key for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Workflows => "workflows",
            Self::Prompts => "prompts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rules" => Ok(Self::Rules),
            "workflows" => Ok(Self::Workflows),
            "prompts" => Ok(Self::Prompts),
            other => Err(format!("unknown category '{other}' (expected rules, workflows or prompts)")),
        }
    }
}

/// How a target writes its category's documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    /// Concatenate every document into the single file at `path`
    Merged,
    /// Write each document as its own file under the directory `path`
    Individual,
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merged => f.write_str("merged"),
            Self::Individual => f.write_str("individual"),
        }
    }
}

/// Named structural transform applied to an agent's output.
///
/// Most agents consume plain markdown. Strategies exist only for destinations
/// that need a different file shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Write documents as rendered
    #[default]
    Plain,
    /// Cursor rule files: `.mdc` extension and `description`/`globs`/`alwaysApply`
    /// frontmatter
    CursorMdc,
}

/// Naming scheme for backup files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupStyle {
    /// `<file>.<YYYYMMDDTHHMMSSZ>.bak`
    #[default]
    Timestamp,
    /// `<file>.bak`
    Bak,
}

fn default_true() -> bool {
    true
}

/// Tool-wide settings from the optional `[settings]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Back up existing destinations before overwriting them
    #[serde(default = "default_true")]
    pub backup: bool,

    /// Backup file naming scheme
    #[serde(default)]
    pub backup_style: BackupStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backup: true,
            backup_style: BackupStyle::default(),
        }
    }
}

/// Ordered list of source files for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFiles {
    /// Paths relative to `content_dir`, in merge order
    #[serde(default)]
    pub files: Vec<String>,
}

/// Where and how one category is written for an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Destination file (`merged`) or directory (`individual`)
    pub path: String,

    /// Output format
    pub format: TargetFormat,

    /// Remove the leading `---` block before writing
    #[serde(default)]
    pub strip_frontmatter: bool,

    /// `individual` only: name outputs by base name (`true`) or keep the path
    /// relative to `content_dir` (`false`)
    #[serde(default = "default_true")]
    pub flatten: bool,
}

/// Detection rule deciding whether an agent is installed.
///
/// The rule matches when any candidate path exists, the binary is on `PATH`,
/// or the probe command exits zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DetectSpec")]
pub struct DetectRule {
    /// Candidate filesystem paths (`~` and `$VAR` expanded)
    pub paths: Vec<String>,
    /// Executable looked up on `PATH`
    pub binary: Option<String>,
    /// Shell command whose zero exit means "installed"
    pub command: Option<String>,
}

impl DetectRule {
    /// Whether the rule has nothing to check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.binary.is_none() && self.command.is_none()
    }
}

/// Accepted spellings of `detect`: a bare list of paths, or a table.
#[derive(Deserialize)]
#[serde(untagged)]
enum DetectSpec {
    Paths(Vec<String>),
    Rule {
        #[serde(default)]
        paths: Vec<String>,
        #[serde(default)]
        binary: Option<String>,
        #[serde(default)]
        command: Option<String>,
    },
}

impl From<DetectSpec> for DetectRule {
    fn from(spec: DetectSpec) -> Self {
        match spec {
            DetectSpec::Paths(paths) => Self {
                paths,
                ..Self::default()
            },
            DetectSpec::Rule {
                paths,
                binary,
                command,
            } => Self {
                paths,
                binary,
                command,
            },
        }
    }
}

/// One destination agent tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Synced by default when no `--agent` is given
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Human-readable description shown by `--list`
    #[serde(default)]
    pub description: String,

    /// Installation detection rule
    #[serde(default)]
    pub detect: Option<DetectRule>,

    /// Structural transform applied to this agent's output
    #[serde(default)]
    pub strategy: Strategy,

    /// Category name to target. Keys are kept as strings so that unknown
    /// categories reach the validator instead of failing the parse.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetSpec>,
}

impl AgentConfig {
    /// Targets for known categories, in [`Category::ALL`] order.
    pub fn known_targets(&self) -> impl Iterator<Item = (Category, &TargetSpec)> {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.targets.get(category.as_str()).map(|t| (category, t)))
    }

    /// Target keys that are not one of the known categories.
    pub fn unknown_target_keys(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str).filter(|key| key.parse::<Category>().is_err())
    }
}

/// The root configuration object, loaded fresh on every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Base path for source content, as written
    pub content_dir: String,

    /// Tool-wide settings
    pub settings: Settings,

    /// Behavioral rule documents
    pub rules: CategoryFiles,

    /// Workflow documents
    pub workflows: CategoryFiles,

    /// Prompt documents
    pub prompts: CategoryFiles,

    /// Agents keyed by name; iteration order is ascending by name
    pub agents: BTreeMap<String, AgentConfig>,

    /// Directory containing the manifest, used to anchor relative paths
    pub manifest_dir: PathBuf,
}

impl Manifest {
    /// The declared file list for a category.
    #[must_use]
    pub fn files_for(&self, category: Category) -> &[String] {
        match category {
            Category::Rules => &self.rules.files,
            Category::Workflows => &self.workflows.files,
            Category::Prompts => &self.prompts.files,
        }
    }

    /// Absolute-ish path of `content_dir` with `~`/`$VAR` expanded.
    pub fn content_root(&self) -> anyhow::Result<PathBuf> {
        crate::utils::resolve_relative_to(&self.manifest_dir, &self.content_dir)
    }

    /// Resolve a target's destination path.
    pub fn resolve_target_path(&self, target: &TargetSpec) -> anyhow::Result<PathBuf> {
        crate::utils::resolve_relative_to(&self.manifest_dir, &target.path)
    }

    /// Look up an agent by name.
    #[must_use]
    pub fn agent(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.get(name)
    }

    /// Directory containing the manifest.
    #[must_use]
    pub fn manifest_dir(&self) -> &Path {
        &self.manifest_dir
    }
}
