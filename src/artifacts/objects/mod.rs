//! Stored object types
//!
//! Everything the repository persists is an immutable object identified by the
//! SHA-1 of its serialized form. There are two kinds:
//!
//! - **Blob**: a file name together with the file's bytes
//! - **Commit**: a snapshot mapping file names to blob ids, plus message,
//!   timestamp and parent commit(s)
//!
//! Both share the framing `<type> <size>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object id in user-facing output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
