//! The default command: sync content into agent destinations.

use crate::cli::validate::{OutputFormat, print_results, run_validation};
use crate::core::SyncError;
use crate::detect::Probe;
use crate::manifest::Manifest;
use crate::sync::{SyncOptions, report, run_sync};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Flags controlling one sync invocation.
#[derive(Debug, Clone, Default)]
pub struct SyncCommand {
    pub options: SyncOptions,
    /// Run the validator first and abort on errors
    pub validate_first: bool,
    /// Suppress informational output
    pub quiet: bool,
}

impl SyncCommand {
    /// Validate (optionally), plan, report, and apply.
    ///
    /// # Errors
    ///
    /// - configuration errors abort before anything is written
    /// - [`SyncError::ValidationFailed`] when `validate_first` finds errors
    /// - [`SyncError::SyncIncomplete`] after a run with per-file or write failures
    pub async fn execute(self, manifest_path: &Path, probe: &dyn Probe) -> Result<()> {
        if self.validate_first {
            let mut results = run_validation(manifest_path, OutputFormat::Text, self.quiet);
            results.finish(false);
            if !results.valid {
                print_results(&results, OutputFormat::Text, self.quiet)?;
                return Err(SyncError::ValidationFailed {
                    count: results.errors.len(),
                }
                .into());
            }
            debug!("Pre-sync validation passed");
        }

        let manifest = Manifest::load(manifest_path)?;
        let run = run_sync(&manifest, &self.options, probe).await?;

        report::print_plan(&run.plan, self.options.dry_run, self.quiet);
        if self.options.dry_run {
            report::print_dry_run_summary(&run.plan, self.quiet);
        } else {
            report::print_outcomes(&run.outcomes, self.quiet);
        }

        run.into_result()?;
        Ok(())
    }
}
