//! Validation results.

use serde::Serialize;

/// Everything the validator found, serialisable for `--format json`.
///
/// Each `*_valid` flag covers one check and is `false` until that check has
/// run cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResults {
    /// No errors (after `--strict` promotion)
    pub valid: bool,
    /// The manifest parsed with all required keys
    pub manifest_valid: bool,
    /// Every listed source file exists
    pub sources_exist: bool,
    /// Every target names a known category
    pub targets_valid: bool,
    /// Every frontmatter block parses
    pub frontmatter_valid: bool,
    /// No two targets share a destination
    pub destinations_unique: bool,
    /// Fatal problems
    pub errors: Vec<String>,
    /// Non-fatal problems
    pub warnings: Vec<String>,
}

impl ValidationResults {
    /// Recompute `valid` from the error list.
    pub fn finish(&mut self, strict: bool) {
        if strict && !self.warnings.is_empty() {
            self.errors.extend(self.warnings.drain(..).map(|w| format!("{w} (strict)")));
        }
        self.valid = self.errors.is_empty();
    }
}
