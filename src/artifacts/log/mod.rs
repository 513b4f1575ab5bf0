//! Commit history traversal
//!
//! History is linear (one parent at most), so a log is a single walk from a
//! starting commit back to the root.

pub mod rev_list;
