//! Typed view of document frontmatter.
//!
//! Only the keys the tool understands are typed. Everything else lands in
//! [`FrontmatterMetadata::extra`] so strategies can round-trip it.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// `globs` may be written as a single pattern or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Globs {
    /// `globs: "**/*.rs"`
    One(String),
    /// `globs: ["**/*.rs", "Cargo.toml"]`
    Many(Vec<String>),
}

impl Globs {
    /// All patterns as a list.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(glob) => vec![glob.clone()],
            Self::Many(globs) => globs.clone(),
        }
    }
}

/// Metadata keys recognized in a document's frontmatter.
///
/// The typed view is lenient: scalar values of any kind become strings
/// (`trigger: true` reads as `"true"`) and `tags` may be one value or a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontmatterMetadata {
    /// When the rule applies (`always`, `glob`, `manual`, `model_decision`, ...)
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,

    /// File patterns the rule is scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globs: Option<Globs>,

    /// Display name
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// One-line description
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-form labels
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Unrecognized keys, preserved as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontmatterMetadata {
    /// Parse raw frontmatter text.
    ///
    /// Blank text yields the default (empty) metadata. Anything that is not a
    /// YAML mapping is rejected.
    pub fn parse(text: &str) -> Result<Self, String> {
        match parse_mapping(text)? {
            Some(value) => serde_yaml::from_value(value).map_err(|e| e.to_string()),
            None => Ok(Self::default()),
        }
    }

    /// Check that raw frontmatter text is a YAML mapping (or empty) without
    /// interpreting any of its keys.
    pub fn check(text: &str) -> Result<(), String> {
        parse_mapping(text).map(|_| ())
    }

    /// Whether the rule is meant to be applied unconditionally.
    #[must_use]
    pub fn is_always(&self) -> bool {
        self.trigger.as_deref().is_some_and(|t| t.eq_ignore_ascii_case("always") || t == "always_on")
    }
}

/// `Ok(None)` for blank or null frontmatter, the mapping otherwise.
fn parse_mapping(text: &str) -> Result<Option<Value>, String> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    match serde_yaml::from_str::<Value>(text).map_err(|e| e.to_string())? {
        value @ Value::Mapping(_) => Ok(Some(value)),
        Value::Null => Ok(None),
        _ => Err("frontmatter must be a mapping of key: value pairs".to_string()),
    }
}

fn scalar_text(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Tagged(tagged) => scalar_text(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err("expected a single value, found a list or mapping".to_string()),
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    scalar_text(Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Sequence(items) => items
            .into_iter()
            .filter_map(|item| scalar_text(item).transpose())
            .collect::<Result<_, _>>()
            .map_err(D::Error::custom),
        other => scalar_text(other).map(|one| one.into_iter().collect()).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        let meta = FrontmatterMetadata::parse(
            "trigger: always\nglobs: \"**/*.rs\"\nname: rust\ndescription: Rust rules\ntags: [lang, rust]\n",
        )
        .unwrap();

        assert_eq!(meta.trigger.as_deref(), Some("always"));
        assert_eq!(meta.globs, Some(Globs::One("**/*.rs".to_string())));
        assert_eq!(meta.name.as_deref(), Some("rust"));
        assert_eq!(meta.description.as_deref(), Some("Rust rules"));
        assert_eq!(meta.tags, vec!["lang", "rust"]);
        assert!(meta.extra.is_empty());
        assert!(meta.is_always());
    }

    #[test]
    fn test_parse_glob_list_and_extra() {
        let meta = FrontmatterMetadata::parse("globs:\n  - a/*.md\n  - b/*.md\nauthor: me\n").unwrap();
        assert_eq!(meta.globs.unwrap().to_vec(), vec!["a/*.md", "b/*.md"]);
        assert_eq!(meta.extra.get("author"), Some(&serde_yaml::Value::String("me".to_string())));
        assert!(meta.trigger.is_none());
    }

    #[test]
    fn test_parse_is_lenient_about_scalar_types() {
        let meta = FrontmatterMetadata::parse("trigger: true\nname: 2024\ndescription: 1.5\ntags: rust\n").unwrap();
        assert_eq!(meta.trigger.as_deref(), Some("true"));
        assert_eq!(meta.name.as_deref(), Some("2024"));
        assert_eq!(meta.description.as_deref(), Some("1.5"));
        assert_eq!(meta.tags, vec!["rust"]);

        let meta = FrontmatterMetadata::parse("tags: [rust, 2024, ~]\nname: ~\n").unwrap();
        assert_eq!(meta.tags, vec!["rust", "2024"]);
        assert!(meta.name.is_none());
    }

    #[test]
    fn test_check_accepts_any_mapping() {
        assert!(FrontmatterMetadata::check("tags: rust\ntrigger: true\nname: 2024\n").is_ok());
        assert!(FrontmatterMetadata::check("name: [a, b]\nnested: {k: v}\n").is_ok());
        assert!(FrontmatterMetadata::check("").is_ok());
        assert!(FrontmatterMetadata::check("~").is_ok());
        assert!(FrontmatterMetadata::check("- a\n- b\n").is_err());
        assert!(FrontmatterMetadata::check("key: [unclosed").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(FrontmatterMetadata::parse("").unwrap(), FrontmatterMetadata::default());
        assert_eq!(FrontmatterMetadata::parse("\n  \n").unwrap(), FrontmatterMetadata::default());
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        assert!(FrontmatterMetadata::parse("just a sentence").is_err());
        assert!(FrontmatterMetadata::parse("- a\n- b\n").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_yaml() {
        assert!(FrontmatterMetadata::parse("key: [unclosed").is_err());
    }
}
