//! Frontmatter validation.

use super::ValidationContext;
use crate::core::SyncError;
use crate::manifest::Category;
use crate::markdown::SourceDocument;
use crate::sync::gather::resolve_entry;

/// Check that every existing source's frontmatter block closes and parses as
/// a key-value mapping. Missing files are left to [`super::validate_sources`].
pub fn validate_frontmatter(ctx: &mut ValidationContext<'_>) {
    let manifest = ctx.manifest;
    let errors_before = ctx.results.errors.len();
    let mut checked = 0usize;

    for category in Category::ALL {
        for entry in manifest.files_for(category) {
            let Ok(resolved) = resolve_entry(&ctx.content_root, entry) else {
                continue;
            };

            for file in resolved {
                checked += 1;
                let problem = SourceDocument::read(&file.relative, &file.absolute)
                    .and_then(|doc| doc.check_frontmatter())
                    .err();

                if let Some(e) = problem {
                    let message = match e.downcast_ref::<SyncError>() {
                        Some(sync_error) => sync_error.to_string(),
                        None => format!("{e:#}"),
                    };
                    ctx.error(message);
                }
            }
        }
    }

    let ok = ctx.results.errors.len() == errors_before;
    ctx.results.frontmatter_valid = ok;
    ctx.print_check(ok, &format!("Frontmatter is valid ({checked} document(s))"));
}
