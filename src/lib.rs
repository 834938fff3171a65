//! bitlet: a small, local, single-user version-control system modeled on Git.
//!
//! - `areas`: the on-disk building blocks (object database, staging index, refs, workspace)
//! - `artifacts`: data structures and algorithms (objects, revisions, checkout, merge, status)
//! - `commands`: user-facing operations implemented on top of [`areas::repository::Repository`]
//! - `errors`: the error taxonomy every command reports through

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the directory holding all repository state
pub const REPOSITORY_DIR: &str = ".bitlet";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
