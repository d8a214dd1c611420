//! Manifest file discovery in directory hierarchies.

use crate::constants::MANIFEST_FILE_NAMES;
use crate::core::SyncError;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Find a manifest by searching up the directory tree from the current
/// directory.
///
/// In each directory, the names in [`MANIFEST_FILE_NAMES`] are tried in order;
/// the first existing file wins. Mirrors Cargo and Git project discovery.
///
/// # Directory Structure Example
///
/// ```text
/// /home/user/dotfiles/
/// ├── agent-sync.toml    ← Found here
/// └── content/
///     └── rules/         ← Search started here, walks up
/// ```
pub fn find_manifest() -> Result<PathBuf> {
    let current = std::env::current_dir()
        .context("Cannot determine current working directory. This may indicate a permission issue or corrupted filesystem")?;
    find_manifest_from(current)
}

/// Use `explicit_path` when given (it must exist), otherwise search upward.
pub fn find_manifest_with_optional(explicit_path: Option<PathBuf>) -> Result<PathBuf> {
    match explicit_path {
        Some(path) => {
            if path.exists() {
                Ok(path)
            } else {
                Err(SyncError::ManifestNotFound {
                    path: path.display().to_string(),
                }
                .into())
            }
        }
        None => find_manifest(),
    }
}

/// Search for a manifest starting at `current` and walking up.
pub fn find_manifest_from(mut current: PathBuf) -> Result<PathBuf> {
    let start = current.display().to_string();
    loop {
        for name in MANIFEST_FILE_NAMES {
            let manifest_path = current.join(name);
            if manifest_path.is_file() {
                return Ok(manifest_path);
            }
        }

        if !current.pop() {
            return Err(SyncError::ManifestNotFound {
                path: start,
            }
            .into());
        }
    }
}
