//! Test utilities for agent-sync
//!
//! Fixtures for manifests and markdown sources, a scripted detection probe,
//! and one-time logging setup. Available to unit tests and, through the
//! `test-utils` feature, to integration tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use agent_sync::test_utils::{FakeProbe, ManifestFixture};
//!
//! let manifest = ManifestFixture::new("content")
//!     .rules(&["rules/a.md"])
//!     .agent("claude", true, "detect = [\"~/.claude\"]")
//!     .build();
//! let probe = FakeProbe::default().with_binary("claude");
//! ```

pub mod fixtures;
pub mod probe;

pub use fixtures::{ManifestFixture, MarkdownFixture};
pub use probe::FakeProbe;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `level` that level is used;
/// otherwise `RUST_LOG` is honoured, and without it logging stays off.
///
/// ```bash
/// RUST_LOG=agent_sync=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
