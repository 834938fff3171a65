//! Materializing a commit in the working directory
//!
//! Checkout of a branch, reset and fast-forward merges all move the working
//! directory from the current commit to a target commit:
//!
//! 1. Plan the file actions (create, delete, rewrite)
//! 2. Refuse when an untracked working file would be clobbered
//! 3. Apply the actions to the workspace
//!
//! All operations are planned before execution, so a refusal leaves the
//! working directory untouched.

pub mod conflict;
pub mod migration;
