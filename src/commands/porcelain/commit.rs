use crate::areas::refs::{Head, RefNamespace};
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::commit::{Author, Commit, strip_comments};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{InvalidState, Result};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created {
        oid: ObjectId,
        branch: RefName,
        is_root: bool,
        short_message: String,
    },
    /// The working tree matches the parent commit; nothing was written
    NothingToCommit,
}

impl Repository {
    /// Record the working tree as a new commit on the current branch
    ///
    /// The first commit of a fresh repository attaches HEAD to the default
    /// branch. Committing on a detached HEAD is refused.
    pub fn commit(
        &self,
        message: &str,
        author: Author,
        time: NaiveDateTime,
    ) -> Result<CommitOutcome> {
        let head = self.refs().read_head()?;
        let branch = match &head {
            Head::Detached(oid) => return Err(InvalidState::DetachedHead(oid.clone()).into()),
            Head::Attached(branch) => branch.clone(),
            Head::Unset => self.config().default_branch().clone(),
        };

        let parent = self.refs().read_ref(RefNamespace::Heads, &branch)?;
        let tree = self.working_tree()?;

        if let Some(parent_oid) = &parent {
            let parent_commit = self.database().parse_object_as_commit(parent_oid)?;

            if *parent_commit.tree_oid() == tree.object_id() {
                tracing::info!(%branch, "working tree unchanged, nothing to commit");
                return Ok(CommitOutcome::NothingToCommit);
            }
        }

        if strip_comments(message).trim().is_empty() {
            return Err(InvalidState::EmptyMessage.into());
        }

        let tree_oid = self.database().store_tree(&tree)?;
        let commit = Commit::new(parent.clone(), tree_oid, author, time, message);
        let commit_oid = self.database().store(&commit)?;

        self.refs()
            .update_ref(RefNamespace::Heads, &branch, &commit_oid, parent.as_ref())?;

        if head == Head::Unset {
            self.refs().set_head(&Head::Attached(branch.clone()))?;
        }

        tracing::info!(%branch, oid = %commit_oid, "created commit");

        Ok(CommitOutcome::Created {
            oid: commit_oid,
            branch,
            is_root: commit.is_root(),
            short_message: commit.short_message().to_string(),
        })
    }
}
