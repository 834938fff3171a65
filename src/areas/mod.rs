//! Repository components backed by the disk
//!
//! - `database`: content-addressed store for blobs and commits
//! - `index`: staging area of pending additions and removals
//! - `refs`: branch pointers and HEAD
//! - `repository`: one invocation's view tying the other areas together
//! - `workspace`: the files directly inside the repository directory

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
