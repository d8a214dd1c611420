//! Core types for agent-sync
//!
//! This module holds the error taxonomy shared by every other module and the
//! user-facing error reporting used by the binary entry point.
//!
//! # Error Handling
//!
//! Application code returns [`anyhow::Result`] and attaches context with
//! `.with_context(...)`. Failures that need a specific exit code or a tailored
//! message are raised as [`SyncError`] variants, which `main` recovers from the
//! `anyhow` chain via [`user_friendly_error`].

pub mod error;

pub use error::{
    EXIT_CONFIG, EXIT_UNKNOWN_AGENT, EXIT_WRITE, ErrorContext, SyncError,
    user_friendly_error,
};
