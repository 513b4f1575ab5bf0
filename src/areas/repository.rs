use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::config::RepositoryConfig;
use crate::errors::{IoResultExt, RepositoryError, Result};
use std::path::Path;

/// Handle on one repository: a working tree plus its metadata directory
///
/// All verbs (`init`, `commit`, `checkout`, ...) are implemented on this type
/// in the `commands` module.
#[derive(Debug)]
pub struct Repository {
    config: RepositoryConfig,
    database: Database,
    refs: Refs,
    workspace: Workspace,
}

impl Repository {
    /// Handle on a working tree that may not be initialized yet
    ///
    /// The working tree is created if missing. Use [`Repository::open`] for
    /// anything but `init`.
    pub fn new(config: RepositoryConfig) -> Result<Self> {
        std::fs::create_dir_all(config.work_tree()).with_path(config.work_tree())?;

        let work_tree = config.work_tree().to_path_buf();
        let config = config.canonicalized().with_path(&work_tree)?;
        let metadata_dir = config.metadata_dir();

        let database = Database::new(metadata_dir.join("objects").into_boxed_path());
        let refs = Refs::new(metadata_dir.into_boxed_path());
        let workspace = Workspace::new(config.work_tree().to_path_buf().into_boxed_path());

        Ok(Repository {
            config,
            database,
            refs,
            workspace,
        })
    }

    /// Handle on an initialized repository
    pub fn open(config: RepositoryConfig) -> Result<Self> {
        if !config.metadata_dir().is_dir() {
            return Err(RepositoryError::NotARepository(
                config.work_tree().to_path_buf(),
            ));
        }

        Self::new(config)
    }

    pub fn path(&self) -> &Path {
        self.config.work_tree()
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}
