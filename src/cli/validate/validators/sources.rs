//! Source file validation.

use super::ValidationContext;
use crate::manifest::Category;
use crate::markdown::is_markdown_file;
use crate::sync::gather::resolve_entry;
use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Check that every listed file exists, and warn about markdown files under
/// `content_dir` that no list mentions.
pub fn validate_sources(ctx: &mut ValidationContext<'_>) {
    let manifest = ctx.manifest;
    let errors_before = ctx.results.errors.len();
    let mut referenced: HashSet<PathBuf> = HashSet::new();

    if !ctx.content_root.is_dir() {
        let message = format!("content_dir does not exist: {}", ctx.content_root.display());
        ctx.error(message);
        ctx.print_check(false, "Source files exist");
        return;
    }

    for category in Category::ALL {
        for entry in manifest.files_for(category) {
            match resolve_entry(&ctx.content_root, entry) {
                Ok(resolved) => referenced.extend(resolved.into_iter().map(|r| r.absolute)),
                Err(e) => ctx.error(format!("{category}: {e}")),
            }
        }
    }

    let unreferenced: Vec<PathBuf> = WalkDir::new(&ctx.content_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
        .map(walkdir::DirEntry::into_path)
        .filter(|p| !referenced.contains(p))
        .collect();
    for path in unreferenced {
        let shown = path.strip_prefix(&ctx.content_root).unwrap_or(&path).display().to_string();
        ctx.warning(format!("{shown} is not referenced by any file list"));
    }

    let ok = ctx.results.errors.len() == errors_before;
    ctx.results.sources_exist = ok;
    ctx.print_check(ok, "Source files exist");
}
