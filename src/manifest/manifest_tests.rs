#[cfg(test)]
mod tests {

    use crate::core::SyncError;
    use crate::manifest::{
        BackupStyle, Category, Manifest, ManifestFormat, Strategy, TargetFormat, find_manifest_from,
        find_manifest_with_optional,
    };

    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const TOML_MANIFEST: &str = r#"
content_dir = "content"

[rules]
files = ["rules/a.md", "rules/b.md"]

[prompts]
files = ["prompts/review.md"]

[agents.claude]
description = "Claude Code"
detect = { paths = ["~/.claude"], binary = "claude" }

[agents.claude.targets.rules]
path = "~/.claude/CLAUDE.md"
format = "merged"
strip_frontmatter = true

[agents.cursor]
enabled = false
strategy = "cursor-mdc"
targets.rules = { path = ".cursor/rules", format = "individual" }
"#;

    fn parse_toml(content: &str) -> anyhow::Result<Manifest> {
        Manifest::parse(content, ManifestFormat::Toml, Path::new("agent-sync.toml"), PathBuf::from("/project"))
    }

    #[test]
    fn test_parse_toml_manifest() {
        let manifest = parse_toml(TOML_MANIFEST).unwrap();

        assert_eq!(manifest.content_dir, "content");
        assert_eq!(manifest.files_for(Category::Rules), ["rules/a.md", "rules/b.md"]);
        assert!(manifest.files_for(Category::Workflows).is_empty());
        assert_eq!(manifest.files_for(Category::Prompts), ["prompts/review.md"]);

        let names: Vec<_> = manifest.agents.keys().cloned().collect();
        assert_eq!(names, vec!["claude", "cursor"]);

        let claude = manifest.agent("claude").unwrap();
        assert!(claude.enabled);
        assert_eq!(claude.strategy, Strategy::Plain);
        let detect = claude.detect.as_ref().unwrap();
        assert_eq!(detect.paths, vec!["~/.claude"]);
        assert_eq!(detect.binary.as_deref(), Some("claude"));
        let rules = &claude.targets["rules"];
        assert_eq!(rules.format, TargetFormat::Merged);
        assert!(rules.strip_frontmatter);
        assert!(rules.flatten);

        let cursor = manifest.agent("cursor").unwrap();
        assert!(!cursor.enabled);
        assert_eq!(cursor.strategy, Strategy::CursorMdc);
        assert!(!cursor.targets["rules"].strip_frontmatter);
    }

    #[test]
    fn test_settings_defaults() {
        let manifest = parse_toml(TOML_MANIFEST).unwrap();
        assert!(manifest.settings.backup);
        assert_eq!(manifest.settings.backup_style, BackupStyle::Timestamp);

        let manifest = parse_toml(
            r#"
content_dir = "c"
agents = {}

[settings]
backup = false
backup_style = "bak"
"#,
        )
        .unwrap();
        assert!(!manifest.settings.backup);
        assert_eq!(manifest.settings.backup_style, BackupStyle::Bak);
    }

    #[test]
    fn test_parse_yaml_manifest() {
        let yaml = r#"
content_dir: content
rules:
  files:
    - rules/a.md
agents:
  windsurf:
    description: Windsurf
    detect:
      - ~/.codeium/windsurf
    targets:
      rules:
        path: out/global_rules.md
        format: merged
"#;
        let manifest = Manifest::parse(
            yaml,
            ManifestFormat::Yaml,
            Path::new("manifest.yaml"),
            PathBuf::from("/project"),
        )
        .unwrap();

        let windsurf = manifest.agent("windsurf").unwrap();
        assert_eq!(windsurf.detect.as_ref().unwrap().paths, vec!["~/.codeium/windsurf"]);
        assert_eq!(
            manifest.resolve_target_path(&windsurf.targets["rules"]).unwrap(),
            PathBuf::from("/project/out/global_rules.md")
        );
    }

    #[test]
    fn test_missing_required_keys_name_the_key() {
        let err = parse_toml("agents = {}").unwrap_err();
        match err.downcast_ref::<SyncError>() {
            Some(SyncError::ConfigError {
                message,
            }) => assert!(message.contains("content_dir")),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = parse_toml(r#"content_dir = "c""#).unwrap_err();
        match err.downcast_ref::<SyncError>() {
            Some(SyncError::ConfigError {
                message,
            }) => assert!(message.contains("agents")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_syntax_is_parse_error() {
        let err = parse_toml("content_dir = [unterminated").unwrap_err();
        assert!(matches!(err.downcast_ref::<SyncError>(), Some(SyncError::ManifestParseError { .. })));
    }

    #[test]
    fn test_unknown_target_keys_survive_parsing() {
        let manifest = parse_toml(
            r#"
content_dir = "c"

[agents.x.targets.snippets]
path = "out"
format = "individual"

[agents.x.targets.rules]
path = "out.md"
format = "merged"
"#,
        )
        .unwrap();

        let agent = manifest.agent("x").unwrap();
        assert_eq!(agent.unknown_target_keys().collect::<Vec<_>>(), vec!["snippets"]);
        assert_eq!(agent.known_targets().map(|(c, _)| c).collect::<Vec<_>>(), vec![Category::Rules]);
    }

    #[test]
    fn test_content_root_is_anchored_at_manifest_dir() {
        let manifest = parse_toml(TOML_MANIFEST).unwrap();
        assert_eq!(manifest.content_root().unwrap(), PathBuf::from("/project/content"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        let err = Manifest::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err.downcast_ref::<SyncError>(), Some(SyncError::ManifestNotFound { .. })));
    }

    #[test]
    fn test_load_sets_manifest_dir() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("agent-sync.toml");
        std::fs::write(&path, TOML_MANIFEST).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.manifest_dir(), temp.path());
    }

    #[test]
    fn test_find_manifest_walks_up_and_prefers_first_name() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("manifest.yaml"), "").unwrap();
        std::fs::write(temp.path().join("agent-sync.toml"), "").unwrap();
        let nested = temp.path().join("content/rules");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_manifest_from(nested).unwrap();
        assert_eq!(found, temp.path().join("agent-sync.toml"));
    }

    #[test]
    fn test_find_manifest_with_optional_missing_explicit() {
        let temp = tempdir().unwrap();
        let err = find_manifest_with_optional(Some(temp.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err.downcast_ref::<SyncError>(), Some(SyncError::ManifestNotFound { .. })));
    }
}
