//! Atomic file writes.
//!
//! Content is written to a temporary file in the destination directory, synced,
//! and renamed over the destination. Readers never observe a half-written file.

use crate::utils::fs::dirs::ensure_parent_dir;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Atomically writes bytes to `path`.
///
/// # Guarantees
///
/// - **Atomicity**: the destination holds either the old or the new content
/// - **Durability**: content is synced to disk before the rename
/// - **Safety**: parent directories are created automatically
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the temporary
/// file cannot be written, or the final rename fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent).with_context(|| {
        let platform_help = if crate::utils::platform::is_windows() {
            "On Windows: Check file permissions, path length, and that directory exists"
        } else {
            "Check file permissions and that directory exists"
        };

        format!("Failed to create temp file in: {}\n\n{}", parent.display(), platform_help)
    })?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
