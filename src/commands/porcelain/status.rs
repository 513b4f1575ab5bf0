use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::status_info::StatusReport;
use crate::errors::Result;

impl Repository {
    pub fn status(&self) -> Result<StatusReport> {
        Ok(match self.refs().read_head()? {
            Head::Detached(oid) => StatusReport::Detached(oid),
            Head::Attached(branch) => StatusReport::OnBranch {
                branch,
                clean: self.is_working_tree_clean()?,
            },
            Head::Unset => StatusReport::OnBranch {
                branch: self.config().default_branch().clone(),
                clean: self.is_working_tree_clean()?,
            },
        })
    }

    /// Whether the working tree hashes to the tree of HEAD's commit
    ///
    /// Nothing is written to the object store. Without any commit the
    /// working tree counts as clean.
    pub fn is_working_tree_clean(&self) -> Result<bool> {
        let Some(head_oid) = self.refs().resolve_head()? else {
            return Ok(true);
        };

        let head_commit = self.database().parse_object_as_commit(&head_oid)?;
        let working_tree = self.working_tree()?;

        Ok(*head_commit.tree_oid() == working_tree.object_id())
    }
}
