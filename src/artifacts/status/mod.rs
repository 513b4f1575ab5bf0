//! Working tree status
//!
//! Status is coarse: the working tree either hashes to HEAD's tree or it
//! does not. There is no per-file breakdown.

pub mod status_info;
