use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use derive_new::new;

/// Lazy walk from a commit to the root, following first parents
///
/// A commit that cannot be read ends the walk after yielding the error.
#[derive(Debug, Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    next_oid: Option<ObjectId>,
}

impl Iterator for RevList<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
