//! Validation execution and result output.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::SyncError;
use crate::manifest::find_manifest_with_optional;

use super::command::{OutputFormat, ValidateCommand};
use super::results::ValidationResults;
use super::validators::{self, ValidationContext};

/// Run every check against the manifest at `manifest_path`.
///
/// Never stops early: a manifest that loads is checked for sources, targets
/// and frontmatter, and all findings are collected. `strict` is not applied
/// here; see [`ValidationResults::finish`].
pub fn run_validation(manifest_path: &Path, format: OutputFormat, quiet: bool) -> ValidationResults {
    let mut results = ValidationResults::default();

    let Some(manifest) = validators::validate_manifest(manifest_path, &mut results) else {
        return results;
    };
    if format == OutputFormat::Text && !quiet {
        println!("{} Manifest is valid: {}", "✓".green(), manifest_path.display());
    }

    let content_root = match manifest.content_root() {
        Ok(root) => root,
        Err(e) => {
            results.errors.push(format!("content_dir: {e:#}"));
            return results;
        }
    };
    debug!("Validating content under {}", content_root.display());

    let mut ctx = ValidationContext::new(&manifest, content_root, format, quiet, &mut results);
    validators::validate_sources(&mut ctx);
    validators::validate_targets(&mut ctx);
    validators::validate_frontmatter(&mut ctx);

    results
}

/// Print results in the requested format.
///
/// # Errors
///
/// Fails only if JSON serialisation fails.
pub fn print_results(results: &ValidationResults, format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Text => {
            for error in &results.errors {
                println!("{} {error}", "✗".red());
            }
            if !quiet {
                for warning in &results.warnings {
                    println!("{} Warning: {warning}", "⚠".yellow());
                }
                if results.valid {
                    println!("{}", "✓ Valid".green().bold());
                }
            }
        }
    }
    Ok(())
}

impl ValidateCommand {
    /// Locate the manifest, validate, and print.
    ///
    /// # Errors
    ///
    /// - [`SyncError::ManifestNotFound`] if no manifest can be located
    /// - [`SyncError::ValidationFailed`] if any error remains
    pub fn execute(self, manifest_path: Option<PathBuf>, quiet: bool) -> Result<()> {
        let manifest_path = match find_manifest_with_optional(manifest_path) {
            Ok(path) => path,
            Err(e) => {
                if self.format == OutputFormat::Json {
                    let results = ValidationResults {
                        errors: vec![e.to_string()],
                        ..Default::default()
                    };
                    println!("{}", serde_json::to_string_pretty(&results)?);
                }
                return Err(e);
            }
        };

        let mut results = run_validation(&manifest_path, self.format, quiet);
        results.finish(self.strict);
        print_results(&results, self.format, quiet)?;

        if results.valid {
            Ok(())
        } else {
            Err(SyncError::ValidationFailed {
                count: results.errors.len(),
            }
            .into())
        }
    }
}
