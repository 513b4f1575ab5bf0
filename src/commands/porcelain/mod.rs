//! Porcelain commands
//!
//! - `init`: Initialize a new repository
//! - `commit`: Record the working tree on the current branch
//! - `log`: Walk commit history
//! - `checkout`: Switch to a branch, tag or commit
//! - `branch`: Create and list branches
//! - `tag`: Create and list tags
//! - `status`: Report HEAD and working tree cleanliness

pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod status;
pub mod tag;
