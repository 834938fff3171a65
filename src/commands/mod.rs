//! Command implementations
//!
//! Commands are methods on [`crate::areas::repository::Repository`], split the
//! way Git splits them:
//!
//! - `plumbing`: building blocks shared by several commands (writing a commit)
//! - `porcelain`: the user-facing operations, one module per command
//!
//! Porcelain commands return [`crate::errors::Result`] and write their output
//! to the repository's writer.

pub mod plumbing;
pub mod porcelain;
