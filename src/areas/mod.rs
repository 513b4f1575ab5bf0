//! Core repository components
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `refs`: Reference management (HEAD, branches, tags)
//! - `repository`: Repository handle tying the other areas together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
