//! Merge engine
//!
//! - `bca_finder`: split point of two histories
//! - `resolution`: per-file three-way decisions
//! - `conflict_file`: content written for conflicting files

pub mod bca_finder;
pub mod conflict_file;
pub mod resolution;
