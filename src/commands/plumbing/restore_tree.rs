use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::workspace::ignore_rules::IgnorePredicate;
use crate::errors::Result;
use std::path::Path;

impl Repository {
    /// Replace the working tree with the content of `tree_oid`
    ///
    /// Everything not ignored is deleted first, then every blob and subtree
    /// is written out. The whole tree is read before anything is deleted, so
    /// a missing or damaged object leaves the working tree untouched.
    pub fn restore_tree(&self, tree_oid: &ObjectId) -> Result<()> {
        self.restore_tree_with(self.workspace(), tree_oid, self.config().ignore_rules())
    }

    /// Same as [`Repository::restore_tree`], into another directory
    pub fn restore_tree_into(
        &self,
        tree_oid: &ObjectId,
        target_dir: &Path,
        ignore: &dyn IgnorePredicate,
    ) -> Result<()> {
        let workspace = Workspace::new(target_dir.to_path_buf().into_boxed_path());

        self.restore_tree_with(&workspace, tree_oid, ignore)
    }

    fn restore_tree_with(
        &self,
        workspace: &Workspace,
        tree_oid: &ObjectId,
        ignore: &dyn IgnorePredicate,
    ) -> Result<()> {
        let snapshot = self.database().read_snapshot(tree_oid)?;

        workspace.rm_rf(ignore)?;
        workspace.materialize(&snapshot)?;
        tracing::debug!(%tree_oid, path = %workspace.path().display(), "restored tree");

        Ok(())
    }
}
