//! Utility modules for agent-sync
//!
//! - [`fs`]: directory creation and atomic writes
//! - [`platform`]: path expansion and executable lookup

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, ensure_parent_dir};
pub use platform::{command_exists, get_home_dir, resolve_path, resolve_relative_to};
