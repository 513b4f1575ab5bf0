//! Paths excluded from snapshots and from working-tree wipes
//!
//! The core only ever asks an [`IgnorePredicate`] whether a path (relative to
//! the working-tree root) is ignored. [`IgnoreRules`] is the set-based
//! implementation loaded from the ignore file; any `Fn(&Path) -> bool` works
//! as well.

use crate::config::METADATA_DIR;
use crate::errors::{IoResultExt, Result};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

pub trait IgnorePredicate {
    fn is_ignored(&self, relative_path: &Path) -> bool;
}

impl<F> IgnorePredicate for F
where
    F: Fn(&Path) -> bool,
{
    fn is_ignored(&self, relative_path: &Path) -> bool {
        self(relative_path)
    }
}

/// Set of ignored relative paths
///
/// A path is ignored when it equals one of the entries exactly, or when any
/// of its components is the repository metadata directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    paths: BTreeSet<PathBuf>,
}

impl IgnoreRules {
    /// Parse ignore-file content: one path per line, `#` starts a comment line
    pub fn parse(source: &str) -> Self {
        Self::from_paths(
            source
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        IgnoreRules {
            paths: paths
                .into_iter()
                .map(|path| normalize(path.as_ref()))
                .filter(|path| !path.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Read an ignore file; a missing file means nothing beyond the metadata
    /// directory is ignored
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let source = std::fs::read_to_string(path).with_path(path)?;
        Ok(Self::parse(&source))
    }
}

impl IgnorePredicate for IgnoreRules {
    fn is_ignored(&self, relative_path: &Path) -> bool {
        is_metadata_path(relative_path) || self.paths.contains(&normalize(relative_path))
    }
}

/// Whether any component of the path is the repository metadata directory
pub fn is_metadata_path(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, Component::Normal(name) if name == METADATA_DIR))
}

/// Drop `.` components and trailing separators so `./a/b/` matches `a/b`
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
