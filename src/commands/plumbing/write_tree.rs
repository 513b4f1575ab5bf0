use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::workspace::ignore_rules::IgnorePredicate;
use crate::errors::Result;
use std::path::Path;

impl Repository {
    /// Store the working tree as tree objects and return the root tree ID
    pub fn write_tree(&self) -> Result<ObjectId> {
        let tree = self.working_tree()?;

        self.database().store_tree(&tree)
    }

    /// Store an arbitrary directory as tree objects
    ///
    /// Paths are handed to `ignore` relative to `root_dir`.
    pub fn write_tree_from(&self, root_dir: &Path, ignore: &dyn IgnorePredicate) -> Result<ObjectId> {
        let workspace = Workspace::new(root_dir.to_path_buf().into_boxed_path());
        let tree = Tree::build(&workspace.snapshot(ignore)?);

        self.database().store_tree(&tree)
    }

    /// Tree of the working tree as it is now, built in memory only
    pub(crate) fn working_tree(&self) -> Result<Tree> {
        let snapshot = self.workspace().snapshot(self.config().ignore_rules())?;

        Ok(Tree::build(&snapshot))
    }
}
