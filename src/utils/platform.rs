//! Cross-platform path helpers.
//!
//! Manifest paths may use `~/` for the home directory and `$VAR` / `${VAR}` for
//! environment variables. Relative paths are anchored at a caller-supplied base,
//! normally the directory containing the manifest.

use anyhow::{Context, Result, bail};
use std::path::{Component, Path, PathBuf};

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Gets the home directory path for the current user.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let var = if is_windows() { "USERPROFILE" } else { "HOME" };
        anyhow::anyhow!("Cannot expand '~' in an agent path: home directory unknown\n\nSet {var} and retry")
    })
}

/// Expands `~/` and environment variables in a path string.
///
/// Only the current user's home (`~` or `~/...`) is supported; `~user/...`
/// is rejected.
///
/// # Errors
///
/// Returns an error for unsupported tilde forms, undefined environment
/// variables, or when the home directory cannot be determined.
///
/// # Examples
///
/// ```rust,no_run
/// use agent_sync::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let rules = resolve_path("~/.claude/CLAUDE.md")?;
/// let workspace = resolve_path("$HOME/.codeium/windsurf/memories")?;
/// # Ok(())
/// # }
/// ```
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = if path == "~" {
        get_home_dir()?
    } else if let Some(stripped) = path.strip_prefix("~/") {
        get_home_dir()?.join(stripped)
    } else if path.starts_with('~') {
        bail!("Unsupported path {path}: Tilde expansion only supports '~' and '~/...', e.g. '~/.cursor/rules'");
    } else {
        PathBuf::from(path)
    };

    let path_str = expanded.to_string_lossy();
    let expanded_str = shellexpand::env(&path_str)
        .with_context(|| format!("Cannot expand {path_str}: every $VAR or ${{VAR}} must be set"))?
        .into_owned();

    Ok(PathBuf::from(expanded_str))
}

/// Expands `path` with [`resolve_path`] and anchors it at `base` when relative.
pub fn resolve_relative_to(base: &Path, path: &str) -> Result<PathBuf> {
    let resolved = resolve_path(path)?;
    if resolved.is_absolute() {
        Ok(resolved)
    } else {
        Ok(base.join(resolved))
    }
}

/// Checks whether an executable with this name is on `PATH`.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Key under which two destination paths compare equal when they name the
/// same file: absolute, with `.` and `..` collapsed lexically.
///
/// Symlinks are not resolved, so the destination need not exist.
#[must_use]
pub fn destination_key(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut key = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(key.components().next_back(), Some(Component::RootDir | Component::Prefix(_)) | None) {
                    key.pop();
                }
            }
            other => key.push(other.as_os_str()),
        }
    }
    key
}

/// Renders a path with forward slashes for stable, cross-platform output.
#[must_use]
pub fn normalize_path_separator(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_home() {
        let home = get_home_dir().unwrap();
        assert_eq!(resolve_path("~").unwrap(), home);
        assert_eq!(resolve_path("~/.claude/CLAUDE.md").unwrap(), home.join(".claude/CLAUDE.md"));
    }

    #[test]
    fn test_resolve_path_rejects_other_users() {
        let err = resolve_path("~alice/rules").unwrap_err();
        assert!(err.to_string().contains("Tilde expansion"));
    }

    #[test]
    fn test_resolve_path_undefined_variable() {
        assert!(resolve_path("$AGENT_SYNC_DEFINITELY_UNDEFINED_VAR/x").is_err());
    }

    #[test]
    fn test_resolve_relative_to() {
        let base = Path::new("/project");
        assert_eq!(resolve_relative_to(base, "out/rules.md").unwrap(), base.join("out/rules.md"));

        #[cfg(unix)]
        assert_eq!(resolve_relative_to(base, "/etc/rules.md").unwrap(), PathBuf::from("/etc/rules.md"));
    }

    #[test]
    fn test_destination_key_collapses_dots() {
        let base = std::env::current_dir().unwrap();
        assert_eq!(destination_key(Path::new("out/x.md")), base.join("out/x.md"));
        assert_eq!(destination_key(Path::new("out/../out/./x.md")), base.join("out/x.md"));
        assert_eq!(destination_key(&base.join("out/x.md")), destination_key(Path::new("./out/x.md")));

        #[cfg(unix)]
        assert_eq!(destination_key(Path::new("/../etc/x")), PathBuf::from("/etc/x"));
    }

    #[test]
    fn test_normalize_path_separator() {
        assert_eq!(normalize_path_separator(Path::new("a/b.md")), "a/b.md");
    }
}
