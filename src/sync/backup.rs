//! Backup-before-overwrite.
//!
//! An existing destination is copied to a sibling path before it is replaced.
//! If the copy fails, the caller must not write.
//!
//! # Naming
//!
//! | Style | Backup of `CLAUDE.md` |
//! |-------|-----------------------|
//! | `timestamp` | `CLAUDE.md.20261016T093000Z.bak` |
//! | `bak` | `CLAUDE.md.bak` |
//!
//! When the name is taken, `-1`, `-2`, ... is inserted before `.bak`, so an
//! earlier backup is never replaced.

use crate::constants::{BACKUP_EXTENSION, BACKUP_TIMESTAMP_FORMAT, MAX_BACKUP_SUFFIX};
use crate::manifest::BackupStyle;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Backup path candidate for `original` before collision handling.
#[must_use]
pub fn backup_path(original: &Path, style: BackupStyle, now: DateTime<Utc>, attempt: u32) -> PathBuf {
    let mut name: OsString = original.file_name().unwrap_or_default().to_os_string();

    if style == BackupStyle::Timestamp {
        name.push(".");
        name.push(now.format(BACKUP_TIMESTAMP_FORMAT).to_string());
    }
    if attempt > 0 {
        name.push(format!("-{attempt}"));
    }
    name.push(".");
    name.push(BACKUP_EXTENSION);

    original.with_file_name(name)
}

/// Copy `original` to a free backup path and return that path.
///
/// # Errors
///
/// Fails if `original` does not exist, no free name is found, or the copy
/// itself fails.
pub fn create_backup(original: &Path, style: BackupStyle) -> Result<PathBuf> {
    create_backup_at(original, style, Utc::now())
}

pub(crate) fn create_backup_at(original: &Path, style: BackupStyle, now: DateTime<Utc>) -> Result<PathBuf> {
    if !original.is_file() {
        bail!("Original file does not exist: {}", original.display());
    }

    for attempt in 0..MAX_BACKUP_SUFFIX {
        let candidate = backup_path(original, style, now, attempt);
        if candidate.exists() {
            continue;
        }

        debug!("Backing up {} to {}", original.display(), candidate.display());
        fs::copy(original, &candidate).with_context(|| {
            format!("Failed to copy {} to {}", original.display(), candidate.display())
        })?;
        return Ok(candidate);
    }

    bail!("No free backup name for {} after {MAX_BACKUP_SUFFIX} attempts", original.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_backup_path_styles() {
        let original = Path::new("/home/u/.claude/CLAUDE.md");

        assert_eq!(
            backup_path(original, BackupStyle::Timestamp, fixed_time(), 0),
            PathBuf::from("/home/u/.claude/CLAUDE.md.20261016T093000Z.bak")
        );
        assert_eq!(
            backup_path(original, BackupStyle::Bak, fixed_time(), 0),
            PathBuf::from("/home/u/.claude/CLAUDE.md.bak")
        );
        assert_eq!(
            backup_path(original, BackupStyle::Bak, fixed_time(), 2),
            PathBuf::from("/home/u/.claude/CLAUDE.md-2.bak")
        );
    }

    #[test]
    fn test_create_backup_preserves_prior_content() {
        let temp = tempdir().unwrap();
        let original = temp.path().join("out.md");
        fs::write(&original, "previous").unwrap();

        let backup = create_backup_at(&original, BackupStyle::Timestamp, fixed_time()).unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "previous");
        assert_eq!(fs::read_to_string(&original).unwrap(), "previous");
    }

    #[test]
    fn test_create_backup_never_replaces_existing_backup() {
        let temp = tempdir().unwrap();
        let original = temp.path().join("out.md");
        fs::write(&original, "v1").unwrap();
        let first = create_backup_at(&original, BackupStyle::Bak, fixed_time()).unwrap();

        fs::write(&original, "v2").unwrap();
        let second = create_backup_at(&original, BackupStyle::Bak, fixed_time()).unwrap();

        assert_ne!(first, second);
        assert_eq!(second, temp.path().join("out.md-1.bak"));
        assert_eq!(fs::read_to_string(first).unwrap(), "v1");
        assert_eq!(fs::read_to_string(second).unwrap(), "v2");
    }

    #[test]
    fn test_create_backup_missing_original() {
        let temp = tempdir().unwrap();
        assert!(create_backup(&temp.path().join("missing.md"), BackupStyle::Bak).is_err());
    }
}
