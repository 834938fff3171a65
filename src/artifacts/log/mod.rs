//! Commit history traversal
//!
//! - `rev_list`: walks parent1 links from one or more starting commits,
//!   yielding each commit at most once

pub mod rev_list;
