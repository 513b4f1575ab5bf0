//! Repository configuration
//!
//! Everything an operation needs to know about *where* it runs is carried by
//! a [`RepositoryConfig`] value instead of process-wide constants, so several
//! repositories can be driven from one process.

use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::workspace::ignore_rules::IgnoreRules;
use crate::errors::Result;
use std::path::{Path, PathBuf};

/// Name of the repository metadata directory inside the working tree
pub const METADATA_DIR: &str = ".twig";

/// Name of the ignore file at the working-tree root
pub const IGNORE_FILE: &str = ".twigignore";

/// Branch HEAD is attached to by the first commit
pub const DEFAULT_BRANCH: &str = "master";

const DEFAULT_BRANCH_VAR: &str = "TWIG_DEFAULT_BRANCH";

#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    work_tree: PathBuf,
    default_branch: RefName,
    ignore_rules: IgnoreRules,
}

impl RepositoryConfig {
    /// Configuration with defaults: `master` and nothing ignored besides the
    /// metadata directory
    pub fn new(work_tree: impl Into<PathBuf>) -> Self {
        RepositoryConfig {
            work_tree: work_tree.into(),
            default_branch: RefName::default_branch(),
            ignore_rules: IgnoreRules::default(),
        }
    }

    /// Configuration as the command-line front end sees it
    ///
    /// Reads the ignore file from the working-tree root and honours
    /// `TWIG_DEFAULT_BRANCH`.
    pub fn load(work_tree: impl Into<PathBuf>) -> Result<Self> {
        let config = Self::new(work_tree);
        let ignore_rules = IgnoreRules::load(&config.work_tree.join(IGNORE_FILE))?;

        let config = match std::env::var(DEFAULT_BRANCH_VAR) {
            Ok(name) if !name.is_empty() => config.with_default_branch(RefName::try_parse(name)?),
            _ => config,
        };

        Ok(config.with_ignore_rules(ignore_rules))
    }

    pub fn with_default_branch(mut self, default_branch: RefName) -> Self {
        self.default_branch = default_branch;
        self
    }

    pub fn with_ignore_rules(mut self, ignore_rules: IgnoreRules) -> Self {
        self.ignore_rules = ignore_rules;
        self
    }

    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.work_tree.join(METADATA_DIR)
    }

    pub fn default_branch(&self) -> &RefName {
        &self.default_branch
    }

    pub fn ignore_rules(&self) -> &IgnoreRules {
        &self.ignore_rules
    }

    pub(crate) fn canonicalized(mut self) -> std::io::Result<Self> {
        self.work_tree = self.work_tree.canonicalize()?;
        Ok(self)
    }
}
