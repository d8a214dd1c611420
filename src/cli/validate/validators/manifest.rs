//! Manifest structure validation.

use crate::cli::validate::results::ValidationResults;
use crate::core::SyncError;
use crate::manifest::Manifest;
use std::path::Path;

/// Load the manifest, recording a failure as an error.
///
/// Returns `None` when the manifest cannot be used for further checks.
pub fn validate_manifest(manifest_path: &Path, results: &mut ValidationResults) -> Option<Manifest> {
    match Manifest::load(manifest_path) {
        Ok(manifest) => {
            results.manifest_valid = true;
            Some(manifest)
        }
        Err(e) => {
            let message = match e.downcast_ref::<SyncError>() {
                Some(SyncError::ManifestParseError {
                    file,
                    reason,
                }) => format!("Invalid manifest syntax in {file}: {reason}"),
                Some(sync_error) => sync_error.to_string(),
                None => format!("{e:#}"),
            };
            results.errors.push(message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_valid_manifest() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("agent-sync.toml");
        fs::write(&path, "content_dir = \"c\"\n[agents.x]\n").unwrap();

        let mut results = ValidationResults::default();
        assert!(validate_manifest(&path, &mut results).is_some());
        assert!(results.manifest_valid);
        assert!(results.errors.is_empty());
    }

    #[test]
    fn test_missing_key_is_named() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("agent-sync.toml");
        fs::write(&path, "[agents.x]\n").unwrap();

        let mut results = ValidationResults::default();
        assert!(validate_manifest(&path, &mut results).is_none());
        assert!(!results.manifest_valid);
        assert!(results.errors[0].contains("content_dir"));
    }

    #[test]
    fn test_syntax_error_includes_reason() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("agent-sync.toml");
        fs::write(&path, "content_dir = [\n").unwrap();

        let mut results = ValidationResults::default();
        validate_manifest(&path, &mut results);
        assert!(results.errors[0].starts_with("Invalid manifest syntax"));
    }
}
