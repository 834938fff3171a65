//! Data structures and algorithms
//!
//! - `branch`: branch names and revision parsing
//! - `checkout`: planning working directory migrations between commits
//! - `core`: output plumbing (pager writer)
//! - `index`: on-disk format of the staging index
//! - `log`: commit history traversal
//! - `merge`: common ancestor search and three-way resolution
//! - `objects`: blobs and commits
//! - `status`: working directory inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
