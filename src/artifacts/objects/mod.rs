//! Stored object types and their codecs
//!
//! Every object is stored as `<type> NUL <content>`:
//!
//! - **Blob**: raw file bytes
//! - **Tree**: one `<type> <id> <name>` line per directory entry
//! - **Commit**: tree, optional parent, author, time and message
//!
//! The object ID is the SHA-256 of that full byte sequence.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-256 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 64;
