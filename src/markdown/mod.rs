//! Markdown source documents with optional YAML frontmatter.
//!
//! Every rule, workflow and prompt is a markdown file that may start with a
//! metadata block:
//!
//! ```text
//! ---
//! trigger: always
//! globs: ["**/*.rs"]
//! description: Rust conventions
//! ---
//!
//! # Rust
//!
//! Prefer `?` over `unwrap()`.
//! ```
//!
//! # Splitting Rules
//!
//! - The first line must be exactly `---` (a trailing `\r` is tolerated).
//! - The block ends at the next line that is exactly `---`.
//! - Lines in between are the frontmatter; the delimiter lines are not.
//! - The body starts after the closing delimiter. One blank line directly
//!   after it is dropped as well.
//! - A file whose first line is not `---` has no frontmatter; the whole file
//!   is body.
//! - An opening delimiter without a closing one is an error.
//!
//! The split never looks past the closing delimiter, so stripping a body that
//! has no leading block returns it unchanged.

pub mod frontmatter;

pub use frontmatter::FrontmatterMetadata;

use crate::constants::FRONTMATTER_DELIMITER;
use crate::core::SyncError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A source document split into frontmatter and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path as written in the manifest (relative to `content_dir`)
    pub relative_path: PathBuf,

    /// Resolved path the document was read from
    pub path: PathBuf,

    /// Raw frontmatter text between the delimiters, `None` when absent
    pub frontmatter: Option<String>,

    /// Content after the frontmatter block
    pub body: String,

    /// The full original file content
    pub raw: String,
}

impl SourceDocument {
    /// Build a document from in-memory text.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::FrontmatterParseError`] for an unterminated block.
    pub fn parse(relative_path: impl Into<PathBuf>, path: impl Into<PathBuf>, raw: String) -> Result<Self> {
        let path = path.into();
        let (frontmatter, body) = split_frontmatter(&raw).map_err(|reason| {
            SyncError::FrontmatterParseError {
                path: path.display().to_string(),
                reason,
            }
        })?;

        Ok(Self {
            relative_path: relative_path.into(),
            frontmatter: frontmatter.map(str::to_string),
            body: body.to_string(),
            path,
            raw,
        })
    }

    /// Read and split a document from disk.
    pub fn read(relative_path: impl Into<PathBuf>, path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        Self::parse(relative_path, path, raw)
    }

    /// Whether the document opened with a frontmatter block.
    #[must_use]
    pub fn has_frontmatter(&self) -> bool {
        self.frontmatter.is_some()
    }

    /// Text to write: the body when stripping, otherwise the original content.
    #[must_use]
    pub fn text(&self, strip_frontmatter: bool) -> &str {
        if strip_frontmatter {
            &self.body
        } else {
            &self.raw
        }
    }

    /// Parse the frontmatter block as YAML metadata.
    ///
    /// Returns `Ok(None)` for documents without frontmatter.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::FrontmatterParseError`] when the block is not a
    /// valid key-value mapping.
    pub fn metadata(&self) -> Result<Option<FrontmatterMetadata>> {
        match &self.frontmatter {
            None => Ok(None),
            Some(text) => FrontmatterMetadata::parse(text)
                .map(Some)
                .map_err(|reason| {
                    SyncError::FrontmatterParseError {
                        path: self.path.display().to_string(),
                        reason,
                    }
                    .into()
                }),
        }
    }

    /// Check that the frontmatter block, if any, is a key-value mapping.
    ///
    /// Unlike [`Self::metadata`] this never looks at individual keys.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::FrontmatterParseError`] for invalid YAML or a
    /// non-mapping block.
    pub fn check_frontmatter(&self) -> Result<()> {
        let Some(text) = &self.frontmatter else {
            return Ok(());
        };
        FrontmatterMetadata::check(text).map_err(|reason| {
            SyncError::FrontmatterParseError {
                path: self.path.display().to_string(),
                reason,
            }
            .into()
        })
    }

    /// File name of the source (`a.md` for `rules/a.md`).
    #[must_use]
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.relative_path.file_name().unwrap_or(self.relative_path.as_os_str())
    }
}

/// Split `input` into `(frontmatter, body)`.
///
/// Returns `Err` with a reason when an opening delimiter has no closing one.
///
/// # Examples
///
/// ```rust
/// use agent_sync::markdown::split_frontmatter;
///
/// let (fm, body) = split_frontmatter("---\ntrigger: always\n---\n\nHello\n").unwrap();
/// assert_eq!(fm, Some("trigger: always\n"));
/// assert_eq!(body, "Hello\n");
///
/// let (fm, body) = split_frontmatter("World\n").unwrap();
/// assert_eq!(fm, None);
/// assert_eq!(body, "World\n");
/// ```
pub fn split_frontmatter(input: &str) -> std::result::Result<(Option<&str>, &str), String> {
    let mut lines = LineCursor::new(input);

    match lines.next() {
        Some((line, _)) if is_delimiter(line) => {}
        _ => return Ok((None, input)),
    }
    let frontmatter_start = lines.offset();

    loop {
        let Some((line, line_start)) = lines.next() else {
            return Err("frontmatter opened with '---' is never closed".to_string());
        };
        if is_delimiter(line) {
            let frontmatter = &input[frontmatter_start..line_start];
            let mut body_start = lines.offset();

            // Drop one blank separator line after the closing delimiter
            let mut peek = LineCursor::at(input, body_start);
            if let Some((next, _)) = peek.next() {
                if next.trim_end_matches('\r').is_empty() {
                    body_start = peek.offset();
                }
            }

            return Ok((Some(frontmatter), &input[body_start..]));
        }
    }
}

/// Remove the leading frontmatter block, if any.
///
/// Idempotent for bodies that do not themselves open with a `---` block.
pub fn strip_frontmatter(input: &str) -> std::result::Result<&str, String> {
    split_frontmatter(input).map(|(_, body)| body)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches('\r') == FRONTMATTER_DELIMITER
}

/// Iterates lines (without `\n`) together with their byte offsets.
struct LineCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(input: &'a str) -> Self {
        Self::at(input, 0)
    }

    fn at(input: &'a str, pos: usize) -> Self {
        Self {
            input,
            pos,
        }
    }

    /// Byte offset of the next unread line.
    fn offset(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = (&'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.input[start..];
        match rest.find('\n') {
            Some(idx) => {
                self.pos = start + idx + 1;
                Some((&rest[..idx], start))
            }
            None => {
                self.pos = self.input.len();
                Some((rest, start))
            }
        }
    }
}

/// Check if a path has a markdown extension (`.md`, `.markdown`, `.mdc`).
#[must_use]
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
        ext.eq_ignore_ascii_case("md")
            || ext.eq_ignore_ascii_case("markdown")
            || ext.eq_ignore_ascii_case("mdc")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_frontmatter() {
        let input = "---\ntrigger: always\n---\nHello\n";
        let (fm, body) = split_frontmatter(input).unwrap();
        assert_eq!(fm, Some("trigger: always\n"));
        assert_eq!(body, "Hello\n");
    }

    #[test]
    fn test_split_drops_only_one_blank_line() {
        let input = "---\na: 1\n---\n\n\nBody";
        let (_, body) = split_frontmatter(input).unwrap();
        assert_eq!(body, "\nBody");
    }

    #[test]
    fn test_split_without_frontmatter() {
        let input = "# Title\n---\nnot frontmatter\n---\n";
        let (fm, body) = split_frontmatter(input).unwrap();
        assert!(fm.is_none());
        assert_eq!(body, input);
    }

    #[test]
    fn test_split_requires_exact_delimiter() {
        let input = "--- \ntitle: x\n---\nBody";
        let (fm, _) = split_frontmatter(input).unwrap();
        assert!(fm.is_none());

        let input = "----\ntitle: x\n----\nBody";
        let (fm, _) = split_frontmatter(input).unwrap();
        assert!(fm.is_none());
    }

    #[test]
    fn test_split_empty_frontmatter() {
        let (fm, body) = split_frontmatter("---\n---\nBody").unwrap();
        assert_eq!(fm, Some(""));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_crlf() {
        let input = "---\r\ntrigger: always\r\n---\r\n\r\nHello\r\n";
        let (fm, body) = split_frontmatter(input).unwrap();
        assert_eq!(fm, Some("trigger: always\r\n"));
        assert_eq!(body, "Hello\r\n");
    }

    #[test]
    fn test_split_frontmatter_at_end_of_file() {
        let (fm, body) = split_frontmatter("---\nname: x\n---").unwrap();
        assert_eq!(fm, Some("name: x\n"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_unterminated_frontmatter_is_error() {
        let err = split_frontmatter("---\ntrigger: always\nHello\n").unwrap_err();
        assert!(err.contains("never closed"));
    }

    #[test]
    fn test_strip_is_idempotent() {
        let inputs = [
            "---\ntrigger: always\n---\n\nHello\n",
            "---\n---\nBody\n",
            "No frontmatter at all\n\n---\nrule\n",
            "",
            "\n\nleading blanks",
        ];
        for input in inputs {
            let once = strip_frontmatter(input).unwrap();
            let twice = strip_frontmatter(once).unwrap();
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_restrip_when_body_opens_with_delimiter() {
        // Body that opens an unterminated block: the second strip fails.
        let once = strip_frontmatter("---\n---\n---\nx").unwrap();
        assert_eq!(once, "---\nx");
        assert!(strip_frontmatter(once).is_err());

        // Body that opens a complete block: the second strip removes it.
        let once = strip_frontmatter("---\n---\n---\nkey: v\n---\nx").unwrap();
        assert_eq!(once, "---\nkey: v\n---\nx");
        assert_eq!(strip_frontmatter(once).unwrap(), "x");
    }

    #[test]
    fn test_source_document_text() {
        let doc = SourceDocument::parse(
            "rules/a.md",
            "/content/rules/a.md",
            "---\ntrigger: always\n---\nHello".to_string(),
        )
        .unwrap();

        assert!(doc.has_frontmatter());
        assert_eq!(doc.text(true), "Hello");
        assert_eq!(doc.text(false), "---\ntrigger: always\n---\nHello");
        assert_eq!(doc.file_name(), "a.md");
    }

    #[test]
    fn test_source_document_unterminated_names_path() {
        let err = SourceDocument::parse("a.md", "/content/a.md", "---\nx: 1\n".to_string())
            .unwrap_err();
        match err.downcast_ref::<SyncError>() {
            Some(SyncError::FrontmatterParseError {
                path,
                ..
            }) => assert_eq!(path, "/content/a.md"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_metadata_parse_error() {
        let doc = SourceDocument::parse("a.md", "a.md", "---\n: : [\n---\nBody".to_string())
            .unwrap();
        assert!(doc.metadata().is_err());
    }

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("a.md")));
        assert!(is_markdown_file(Path::new("a.MD")));
        assert!(is_markdown_file(Path::new("a.mdc")));
        assert!(!is_markdown_file(Path::new("a.toml")));
        assert!(!is_markdown_file(Path::new("README")));
    }
}
