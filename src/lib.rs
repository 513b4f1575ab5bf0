//! A small content-addressed version control engine
//!
//! - `areas`: Object database, refs, working directory and the [`Repository`](areas::repository::Repository) handle
//! - `artifacts`: Object types, ref names, snapshots and history traversal
//! - `commands`: Verbs implemented on `Repository`
//! - `config`: Per-repository configuration
//! - `errors`: Error taxonomy shared by every operation

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
