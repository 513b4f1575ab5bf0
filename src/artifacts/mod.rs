//! Repository data structures and algorithms
//!
//! - `branch`: Ref names and revision resolution
//! - `core`: Shared file-system helpers
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, tree, commit) and their codecs
//! - `status`: Working tree status
//! - `workspace`: Directory snapshots and ignore rules

pub mod branch;
pub mod core;
pub mod log;
pub mod objects;
pub mod status;
pub mod workspace;
