//! Manifest loading (TOML or YAML).

use crate::core::SyncError;
use crate::manifest::{AgentConfig, CategoryFiles, Manifest, Settings};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialization format of a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
}

impl ManifestFormat {
    /// Pick the format from the file extension. Anything that is not
    /// `.yaml`/`.yml` is read as TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Toml,
        }
    }
}

/// On-disk shape with every top-level key optional, so missing required keys
/// are reported by name instead of as a generic parse failure.
#[derive(Debug, Deserialize)]
struct RawManifest {
    content_dir: Option<String>,
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    rules: CategoryFiles,
    #[serde(default)]
    workflows: CategoryFiles,
    #[serde(default)]
    prompts: CategoryFiles,
    agents: Option<BTreeMap<String, AgentConfig>>,
}

impl Manifest {
    /// Load and parse a manifest file.
    ///
    /// # Errors
    ///
    /// - [`SyncError::ManifestNotFound`] if the file does not exist
    /// - [`SyncError::ManifestParseError`] if it is not valid TOML/YAML
    /// - [`SyncError::ConfigError`] if `content_dir` or `agents` is missing
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use agent_sync::manifest::Manifest;
    /// use std::path::Path;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let manifest = Manifest::load(Path::new("agent-sync.toml"))?;
    /// println!("{} agents declared", manifest.agents.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::ManifestNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

        let manifest_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        debug!("Loading manifest {}", path.display());
        Self::parse(&content, ManifestFormat::from_path(path), path, manifest_dir)
    }

    /// Parse manifest text. `source` is used only in error messages.
    pub fn parse(
        content: &str,
        format: ManifestFormat,
        source: &Path,
        manifest_dir: PathBuf,
    ) -> Result<Self> {
        let raw: RawManifest = match format {
            ManifestFormat::Toml => toml::from_str(content).map_err(|e| {
                SyncError::ManifestParseError {
                    file: source.display().to_string(),
                    reason: e.to_string(),
                }
            })?,
            ManifestFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
                SyncError::ManifestParseError {
                    file: source.display().to_string(),
                    reason: e.to_string(),
                }
            })?,
        };

        let content_dir = raw.content_dir.ok_or_else(|| SyncError::ConfigError {
            message: format!("missing required key 'content_dir' in {}", source.display()),
        })?;
        let agents = raw.agents.ok_or_else(|| SyncError::ConfigError {
            message: format!("missing required key 'agents' in {}", source.display()),
        })?;

        if content_dir.trim().is_empty() {
            return Err(SyncError::ConfigError {
                message: "'content_dir' must not be empty".to_string(),
            }
            .into());
        }

        Ok(Self {
            content_dir,
            settings: raw.settings,
            rules: raw.rules,
            workflows: raw.workflows,
            prompts: raw.prompts,
            agents,
            manifest_dir,
        })
    }
}
