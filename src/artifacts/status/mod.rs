//! Working directory status
//!
//! Compares the working directory against the staging index and the HEAD
//! commit.
//!
//! - `file_change`: how an unstaged file differs
//! - `inspector`: the comparison itself, producing a [`inspector::StatusReport`]

pub mod file_change;
pub mod inspector;
