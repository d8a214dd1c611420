//! Content gathering: resolve manifest file lists into source documents.

use crate::core::SyncError;
use crate::manifest::{Category, Manifest};
use crate::markdown::SourceDocument;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A manifest entry resolved to a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Path relative to `content_dir`
    pub relative: PathBuf,
    /// Path on disk
    pub absolute: PathBuf,
}

/// Whether a file-list entry should be treated as a glob pattern.
#[must_use]
pub fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Resolve one manifest entry against `content_root`.
///
/// Plain entries resolve to exactly one file. Glob entries expand to every
/// matching file, sorted by path. An entry resolving to nothing yields
/// [`SyncError::MissingSourceFile`].
pub fn resolve_entry(content_root: &Path, entry: &str) -> Result<Vec<ResolvedEntry>, SyncError> {
    let missing = || SyncError::MissingSourceFile {
        path: entry.to_string(),
    };

    if !is_glob(entry) {
        let absolute = content_root.join(entry);
        if !absolute.is_file() {
            return Err(missing());
        }
        return Ok(vec![ResolvedEntry {
            relative: PathBuf::from(entry),
            absolute,
        }]);
    }

    // The root is literal; only the entry may carry wildcards.
    let root = glob::Pattern::escape(&content_root.to_string_lossy());
    let pattern = Path::new(&root).join(entry);
    let pattern = pattern.to_string_lossy();
    let paths = glob::glob(&pattern).map_err(|e| SyncError::ConfigError {
        message: format!("invalid glob pattern '{entry}': {e}"),
    })?;

    let mut resolved: Vec<ResolvedEntry> = paths
        .filter_map(std::result::Result::ok)
        .filter(|p| p.is_file())
        .map(|absolute| {
            let relative = absolute.strip_prefix(content_root).unwrap_or(&absolute).to_path_buf();
            ResolvedEntry {
                relative,
                absolute,
            }
        })
        .collect();
    resolved.sort_by(|a, b| a.relative.cmp(&b.relative));

    if resolved.is_empty() {
        return Err(missing());
    }
    debug!("Glob '{entry}' matched {} file(s)", resolved.len());
    Ok(resolved)
}

/// Documents of one category plus the per-file problems met along the way.
#[derive(Debug, Clone, Default)]
pub struct GatheredCategory {
    /// Successfully read documents, in manifest order
    pub documents: Vec<SourceDocument>,
    /// Missing files and unreadable or malformed documents
    pub issues: Vec<SyncError>,
}

/// Gathered documents for the categories a run needs.
#[derive(Debug, Clone, Default)]
pub struct ContentSet {
    categories: BTreeMap<Category, GatheredCategory>,
}

impl ContentSet {
    /// Read every document listed for each of `categories`.
    ///
    /// Per-file failures are recorded, not returned. Only an unresolvable
    /// `content_dir` fails the whole gather.
    pub fn gather(manifest: &Manifest, categories: impl IntoIterator<Item = Category>) -> Result<Self> {
        let content_root = manifest.content_root()?;
        let mut set = Self::default();

        for category in categories {
            if set.categories.contains_key(&category) {
                continue;
            }
            let gathered = gather_category(&content_root, manifest.files_for(category));
            debug!(
                "Gathered {} {} document(s), {} issue(s)",
                gathered.documents.len(),
                category,
                gathered.issues.len()
            );
            set.categories.insert(category, gathered);
        }

        Ok(set)
    }

    /// The gathered documents for `category` (empty if not gathered).
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&GatheredCategory> {
        self.categories.get(&category)
    }
}

/// Resolve and read every entry of one category's file list.
pub fn gather_category(content_root: &Path, files: &[String]) -> GatheredCategory {
    let mut gathered = GatheredCategory::default();

    for entry in files {
        let resolved = match resolve_entry(content_root, entry) {
            Ok(resolved) => resolved,
            Err(e) => {
                debug!("Skipping '{entry}': {e}");
                gathered.issues.push(e);
                continue;
            }
        };

        for file in resolved {
            debug!("Reading {}", file.absolute.display());
            match SourceDocument::read(&file.relative, &file.absolute) {
                Ok(doc) => {
                    debug!(
                        "Split {} (frontmatter: {})",
                        file.relative.display(),
                        if doc.has_frontmatter() { "yes" } else { "no" }
                    );
                    gathered.documents.push(doc);
                }
                Err(e) => {
                    let issue = match e.downcast::<SyncError>() {
                        Ok(sync_error) => sync_error,
                        Err(other) => SyncError::Other {
                            message: format!("{other:#}"),
                        },
                    };
                    gathered.issues.push(issue);
                }
            }
        }
    }

    gathered
}
