//! Directory creation helpers.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Create `path` and any missing parents. Existing directories are left alone.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, or if `path` exists
/// but is not a directory.
///
/// # Examples
///
/// ```rust,no_run
/// use agent_sync::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// ensure_dir(Path::new("~/.cursor/rules"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        bail!("Cannot create directory {}: a file is in the way (not a directory)", path.display());
    }

    fs::create_dir_all(path).with_context(|| {
        let hint = if crate::utils::platform::is_windows() {
            "Agent directories under long paths may need long path support enabled"
        } else {
            "Check that the agent directory is writable"
        };
        format!("Failed to create directory {}\n\n{hint}", path.display())
    })
}

/// Create the directory a destination file will live in.
///
/// Paths without a parent (bare file names) are a no-op.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}
