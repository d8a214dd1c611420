//! Global constants used throughout the agent-sync codebase.
//!
//! File names, environment variables and formats that several modules
//! agree on are defined here so they stay discoverable.

/// Manifest file names searched for, in priority order, when no explicit
/// manifest path is given.
pub const MANIFEST_FILE_NAMES: &[&str] = &[
    "agent-sync.toml",
    "agent-sync.yaml",
    "agent-sync.yml",
    "manifest.toml",
    "manifest.yaml",
    "manifest.yml",
];

/// Environment variable overriding the manifest path.
pub const MANIFEST_ENV: &str = "AGENT_SYNC_MANIFEST";

/// Environment variable disabling backups for a run.
pub const NO_BACKUP_ENV: &str = "AGENT_SYNC_NO_BACKUP";

/// Extension appended to every backup file.
pub const BACKUP_EXTENSION: &str = "bak";

/// `chrono` format for timestamped backups (UTC, filesystem-safe).
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Upper bound on `-N` suffixes tried when a backup name is already taken.
pub const MAX_BACKUP_SUFFIX: u32 = 1000;

/// Opening and closing line of a frontmatter block.
pub const FRONTMATTER_DELIMITER: &str = "---";
