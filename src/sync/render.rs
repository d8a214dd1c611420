//! Rendering: turn a target and its documents into destination files.
//!
//! Every agent goes through the same renderer. Agent differences are data
//! ([`TargetFormat`], `strip_frontmatter`, `flatten`); the one structural
//! exception is isolated in [`Strategy::CursorMdc`].

use crate::core::SyncError;
use crate::manifest::{Strategy, TargetFormat, TargetSpec};
use crate::markdown::SourceDocument;
use std::path::{Path, PathBuf};

/// One file a target will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Destination path
    pub destination: PathBuf,
    /// Full file content
    pub content: String,
    /// Source documents that contributed, in order
    pub sources: Vec<PathBuf>,
}

/// Render a target. `destination` is the already-resolved target path.
///
/// Returns the files to write plus per-document problems (only the
/// `cursor-mdc` strategy can produce those, when it cannot read metadata).
pub fn render_target(
    target: &TargetSpec,
    strategy: Strategy,
    destination: &Path,
    documents: &[SourceDocument],
) -> (Vec<RenderedFile>, Vec<SyncError>) {
    match target.format {
        TargetFormat::Merged => (vec![render_merged(target, destination, documents)], Vec::new()),
        TargetFormat::Individual => render_individual(target, strategy, destination, documents),
    }
}

/// Concatenate documents in order, separated by one blank line.
///
/// Trailing newlines of each piece are trimmed so that exactly one blank line
/// separates neighbours.
#[must_use]
pub fn merge_documents(documents: &[SourceDocument], strip_frontmatter: bool) -> String {
    documents
        .iter()
        .map(|doc| doc.text(strip_frontmatter).trim_end_matches(['\n', '\r']))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_merged(target: &TargetSpec, destination: &Path, documents: &[SourceDocument]) -> RenderedFile {
    RenderedFile {
        destination: destination.to_path_buf(),
        content: merge_documents(documents, target.strip_frontmatter),
        sources: documents.iter().map(|d| d.path.clone()).collect(),
    }
}

fn render_individual(
    target: &TargetSpec,
    strategy: Strategy,
    destination: &Path,
    documents: &[SourceDocument],
) -> (Vec<RenderedFile>, Vec<SyncError>) {
    let mut files = Vec::with_capacity(documents.len());
    let mut issues = Vec::new();

    for doc in documents {
        let content = match strategy {
            Strategy::Plain => doc.text(target.strip_frontmatter).to_string(),
            Strategy::CursorMdc => match to_cursor_mdc(doc) {
                Ok(content) => content,
                Err(e) => {
                    issues.push(e);
                    continue;
                }
            },
        };

        files.push(RenderedFile {
            destination: individual_destination(target, strategy, destination, &doc.relative_path),
            content,
            sources: vec![doc.path.clone()],
        });
    }

    (files, issues)
}

/// Output path of one source in an `individual` target.
///
/// `relative` is the source path relative to `content_dir`.
#[must_use]
pub fn individual_destination(target: &TargetSpec, strategy: Strategy, directory: &Path, relative: &Path) -> PathBuf {
    let name = if target.flatten {
        relative.file_name().map(PathBuf::from).unwrap_or_else(|| relative.to_path_buf())
    } else {
        relative.to_path_buf()
    };

    match strategy {
        Strategy::Plain => directory.join(name),
        Strategy::CursorMdc => directory.join(name.with_extension("mdc")),
    }
}

/// Rewrite a document as a Cursor `.mdc` rule.
///
/// The original frontmatter is replaced by Cursor's three keys:
/// - `description` from `description` (or `name`)
/// - `globs` from `globs`, comma-joined
/// - `alwaysApply` true when `trigger` is `always`
fn to_cursor_mdc(doc: &SourceDocument) -> Result<String, SyncError> {
    let metadata = doc
        .metadata()
        .map_err(|e| match e.downcast::<SyncError>() {
            Ok(sync_error) => sync_error,
            Err(other) => SyncError::Other {
                message: other.to_string(),
            },
        })?
        .unwrap_or_default();

    let always = metadata.is_always();
    let description = metadata.description.or(metadata.name).unwrap_or_default();
    let globs = metadata.globs.map(|g| g.to_vec().join(",")).unwrap_or_default();

    Ok(format!(
        "---\ndescription: {description}\nglobs: {globs}\nalwaysApply: {always}\n---\n\n{}",
        doc.body
    ))
}
