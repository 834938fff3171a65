//! Plumbing shared by the porcelain commands
//!
//! - `write_commit`: turn the staging index into a commit and advance the current branch

pub mod write_commit;
