use crate::areas::refs::RefNamespace;
use crate::areas::repository::Repository;
use crate::errors::{IoResultExt, Result};
use std::fs;

/// Scratch file for commit messages, owned by the command-line front end
pub const COMMIT_MESSAGE_FILE: &str = "COMMIT_EDITMSG";

impl Repository {
    /// Create the metadata layout
    ///
    /// Running it on an initialized repository is harmless: existing
    /// objects, refs and HEAD are left as they are.
    pub fn init(&self) -> Result<()> {
        let objects_path = self.database().objects_path();
        fs::create_dir_all(objects_path).with_path(objects_path)?;

        for namespace_path in [
            self.refs().namespace_path(RefNamespace::Heads),
            self.refs().namespace_path(RefNamespace::Tags),
        ] {
            fs::create_dir_all(&namespace_path).with_path(&namespace_path)?;
        }

        let metadata_dir = self.config().metadata_dir();
        for file_path in [self.refs().head_path(), metadata_dir.join(COMMIT_MESSAGE_FILE)] {
            if !file_path.exists() {
                fs::write(&file_path, b"").with_path(&file_path)?;
            }
        }

        tracing::info!(path = %self.path().display(), "initialized repository");

        Ok(())
    }
}
