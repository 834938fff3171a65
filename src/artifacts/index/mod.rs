//! Staging index file format
//!
//! The index records what the next commit changes relative to HEAD: files
//! staged for addition (with the blob they will point to) and files staged
//! for removal.
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "STGE" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length, padded with NUL to 8-byte alignment):
//!   - Kind: '+' addition, '-' removal (1 byte)
//!   - Blob id, zeroed for removals (20 bytes)
//!   - Name length (2 bytes)
//!   - Name
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "STGE";

/// Index file format version
pub const VERSION: u32 = 1;
