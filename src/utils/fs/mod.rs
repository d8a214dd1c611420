//! File system helpers.
//!
//! - [`dirs`]: directory creation
//! - [`atomic`]: write-then-rename file writes

pub mod atomic;
pub mod dirs;

pub use atomic::atomic_write;
pub use dirs::{ensure_dir, ensure_parent_dir};
