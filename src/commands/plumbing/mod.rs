//! Plumbing commands
//!
//! - `hash-object`: Store raw data as an object
//! - `cat-file`: Read an object back, optionally checking its type
//! - `write-tree`: Snapshot the working tree as tree objects
//! - `restore-tree`: Overwrite a directory with the content of a tree

pub mod cat_file;
pub mod hash_object;
pub mod restore_tree;
pub mod write_tree;
