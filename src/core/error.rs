//! Error handling for agent-sync
//!
//! This module provides the error taxonomy and user-friendly error reporting for
//! the sync tool. The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can branch on failure kinds
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`SyncError`] - Enumerated error types for every failure class
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//!
//! Every [`SyncError`] maps to a process exit code through [`SyncError::exit_code`]:
//!
//! | Code | Meaning |
//! |------|---------|
//! | `0`  | Success |
//! | `1`  | Validation or configuration error |
//! | `2`  | Unknown agent requested |
//! | `3`  | Write failure (including a failed backup) |
//!
//! # Examples
//!
//! ```rust,no_run
//! use agent_sync::core::{SyncError, user_friendly_error};
//!
//! let error = SyncError::UnknownAgent {
//!     name: "ghost".to_string(),
//!     suggestion: None,
//! };
//! assert_eq!(error.exit_code(), 2);
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Exit code for validation and configuration errors.
pub const EXIT_CONFIG: i32 = 1;
/// Exit code when the requested agent is not declared in the manifest.
pub const EXIT_UNKNOWN_AGENT: i32 = 2;
/// Exit code for destination write failures, including failed backups.
pub const EXIT_WRITE: i32 = 3;

/// The main error type for sync operations.
///
/// Configuration-level errors ([`ConfigError`], [`ManifestNotFound`],
/// [`ManifestParseError`], [`UnknownAgent`], [`DestinationConflict`]) abort the
/// entire run. Per-file errors ([`MissingSourceFile`], [`FrontmatterParseError`])
/// are collected per agent and reported at the end of a sync. Write errors
/// ([`WriteError`], [`BackupFailed`]) stop the remaining targets of one agent.
///
/// [`ConfigError`]: SyncError::ConfigError
/// [`ManifestNotFound`]: SyncError::ManifestNotFound
/// [`ManifestParseError`]: SyncError::ManifestParseError
/// [`UnknownAgent`]: SyncError::UnknownAgent
/// [`DestinationConflict`]: SyncError::DestinationConflict
/// [`MissingSourceFile`]: SyncError::MissingSourceFile
/// [`FrontmatterParseError`]: SyncError::FrontmatterParseError
/// [`WriteError`]: SyncError::WriteError
/// [`BackupFailed`]: SyncError::BackupFailed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Manifest content is structurally invalid (missing key, bad value)
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error, naming the offending key
        message: String,
    },

    /// No manifest file could be located
    #[error("Manifest file not found: {path}")]
    ManifestNotFound {
        /// The explicit path, or the directory where the search started
        path: String,
    },

    /// The manifest exists but is not valid TOML/YAML
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// `--agent <name>` named an agent the manifest does not declare
    #[error("Unknown agent '{name}'")]
    UnknownAgent {
        /// The requested agent name
        name: String,
        /// Closest declared agent name, if any is similar enough
        suggestion: Option<String>,
    },

    /// A listed content file does not exist under `content_dir`
    #[error("Source file not found: {path}")]
    MissingSourceFile {
        /// The entry as written in the manifest
        path: String,
    },

    /// A source document opens a frontmatter block that never closes, or the
    /// block is not valid key-value data
    #[error("Invalid frontmatter in {path}: {reason}")]
    FrontmatterParseError {
        /// Path of the offending document
        path: String,
        /// What is wrong with the block
        reason: String,
    },

    /// Two targets resolve to the same destination file
    #[error("Destination {path} is written by both {first} and {second}")]
    DestinationConflict {
        /// The shared destination
        path: String,
        /// `agent/category` of the first owner
        first: String,
        /// `agent/category` of the second owner
        second: String,
    },

    /// A destination could not be written
    #[error("Failed to write {path}: {reason}")]
    WriteError {
        /// Destination path
        path: String,
        /// Underlying I/O message
        reason: String,
    },

    /// The existing destination could not be backed up, so it was left untouched
    #[error("Failed to back up {path}: {reason}")]
    BackupFailed {
        /// Destination path whose backup failed
        path: String,
        /// Underlying I/O message
        reason: String,
    },

    /// The validator found one or more errors
    #[error("Validation failed with {count} error(s)")]
    ValidationFailed {
        /// Number of errors reported
        count: usize,
    },

    /// A sync completed but some agents reported failures
    #[error("Sync finished with {failed_files} file error(s) and {failed_writes} write error(s)")]
    SyncIncomplete {
        /// Per-file source errors (missing, bad frontmatter)
        failed_files: usize,
        /// Agents that stopped on a write failure
        failed_writes: usize,
    },

    /// Anything else
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl SyncError {
    /// Map this error to the process exit code documented for the CLI.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownAgent {
                ..
            } => EXIT_UNKNOWN_AGENT,
            Self::WriteError {
                ..
            }
            | Self::BackupFailed {
                ..
            } => EXIT_WRITE,
            Self::SyncIncomplete {
                failed_writes,
                ..
            } if *failed_writes > 0 => EXIT_WRITE,
            _ => EXIT_CONFIG,
        }
    }
}

/// Error wrapper carrying optional details and a suggestion for display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SyncError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: SyncError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    ///
    /// Details are displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Exit code of the wrapped error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes, in order:
/// - [`SyncError`] anywhere in the `anyhow` chain, with tailored suggestions
/// - [`std::io::Error`] with filesystem guidance
/// - [`toml::de::Error`] and [`serde_yaml::Error`] with syntax guidance
/// - Anything else, with the full cause chain appended
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(sync_error) = error.chain().find_map(|e| e.downcast_ref::<SyncError>()) {
        return create_error_context(sync_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(SyncError::Other {
                message: format!("Permission denied: {io_error}"),
            })
            .with_suggestion("Check ownership and permissions of the destination directories");
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(SyncError::ManifestParseError {
            file: "manifest".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your manifest. Verify quotes, brackets, and tables");
    }

    if let Some(yaml_error) = error.downcast_ref::<serde_yaml::Error>() {
        return ErrorContext::new(SyncError::ManifestParseError {
            file: "manifest".to_string(),
            reason: yaml_error.to_string(),
        })
        .with_suggestion("Check the YAML syntax in your manifest. Verify indentation and list markers");
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SyncError::Other {
        message,
    })
}

fn create_error_context(error: SyncError) -> ErrorContext {
    match &error {
        SyncError::ManifestNotFound {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Pass --manifest <path> or set AGENT_SYNC_MANIFEST")
            .with_details(
                "agent-sync looks for agent-sync.toml, agent-sync.yaml or manifest.{toml,yaml,yml} \
                 in the current directory and its parents",
            ),

        SyncError::ManifestParseError {
            reason,
            ..
        } => ErrorContext::new(error.clone())
            .with_details(reason.clone())
            .with_suggestion("Fix the syntax error, then run 'agent-sync validate'"),

        SyncError::ConfigError {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(
            "Every manifest needs 'content_dir' and an [agents] table. Run 'agent-sync validate' for a full report",
        ),

        SyncError::UnknownAgent {
            suggestion,
            ..
        } => {
            let ctx = ErrorContext::new(error.clone());
            match suggestion {
                Some(name) => ctx.with_suggestion(format!("Did you mean '{name}'?")),
                None => ctx.with_suggestion("Run 'agent-sync --list' to see declared agents"),
            }
        }

        SyncError::DestinationConflict {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Give each target its own destination path")
            .with_details("Two targets writing one file would silently clobber each other"),

        SyncError::BackupFailed {
            ..
        } => ErrorContext::new(error.clone())
            .with_details("The destination was left untouched")
            .with_suggestion("Free disk space or fix permissions, or re-run with --no-backup"),

        SyncError::WriteError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check that the destination directory is writable"),

        SyncError::ValidationFailed {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Run 'agent-sync validate' to see every issue"),

        _ => ErrorContext::new(error),
    }
}
