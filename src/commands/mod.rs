//! Repository verbs
//!
//! Every verb is an inherent method on [`Repository`](crate::areas::repository::Repository),
//! split in two groups:
//!
//! - `plumbing`: object-level building blocks (hash-object, cat-file, write-tree, restore-tree)
//! - `porcelain`: user-facing workflows (init, commit, log, checkout, branch, tag, status)
//!
//! Verbs return values; printing them is left to the caller.

pub mod plumbing;
pub mod porcelain;
