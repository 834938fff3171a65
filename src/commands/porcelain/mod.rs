//! Porcelain commands
//!
//! Every command that mutates the repository holds the repository lock for
//! its whole duration.
//!
//! ## Commands
//!
//! - `init`: create the repository with its root commit
//! - `add` / `rm`: stage a file for addition or removal
//! - `commit`: snapshot the staging index
//! - `log` / `global_log`: print history
//! - `find`: list commits by message
//! - `status`: branches, staged changes and working directory changes
//! - `branch` / `rm_branch`: create or delete a branch pointer
//! - `checkout`: restore a file, or switch branches
//! - `reset`: move the current branch to any commit
//! - `merge`: merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
