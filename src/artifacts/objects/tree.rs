//! Tree object
//!
//! Trees are directory snapshots. Each entry references a blob (file) or a
//! nested tree (subdirectory) by ID.
//!
//! ## Format
//!
//! On disk: `tree\0<entries>`
//! Each entry: `<entry_type> <object_id> <name>\n`
//!
//! Entries are sorted by the tuple `(entry_type, object_id, name)`, not by
//! name alone, so all blobs precede all subtrees. This ordering is part of
//! the format: changing it changes every tree ID.
//!
//! ## Tree Building
//!
//! A tree built from a [`DirSnapshot`] keeps every blob and subtree it
//! references in memory until [`Tree::traverse`] hands them to the database,
//! children first. A tree read back from the database has no pending
//! children.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::workspace::snapshot::{DirSnapshot, SnapshotEntry};
use crate::errors::{RepositoryError, Result};
use bytes::Bytes;
use derive_new::new;

/// One line of a tree object
///
/// Field order defines the derived `Ord`, which is the on-disk sort key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct TreeEntry {
    entry_type: ObjectType,
    oid: ObjectId,
    name: String,
}

impl TreeEntry {
    pub fn entry_type(&self) -> ObjectType {
        self.entry_type
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn to_line(&self) -> String {
        format!("{} {} {}\n", self.entry_type, self.oid, self.name)
    }
}

/// Object reachable from a freshly built tree that still has to be stored
#[derive(Debug, Clone)]
enum PendingObject {
    Blob(Blob),
    Tree(Tree),
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: Vec<TreeEntry>,
    pending: Vec<PendingObject>,
}

impl Tree {
    /// Tree from already-known entries; they are sorted into canonical order
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort();

        Tree {
            entries,
            pending: Vec::new(),
        }
    }

    /// Build a tree (and all nested trees) from a directory snapshot
    pub fn build(snapshot: &DirSnapshot) -> Self {
        let mut entries = Vec::with_capacity(snapshot.len());
        let mut pending = Vec::with_capacity(snapshot.len());

        for entry in snapshot.entries() {
            match entry {
                SnapshotEntry::File { name, data } => {
                    let blob = Blob::new(data.clone());
                    entries.push(TreeEntry::new(
                        ObjectType::Blob,
                        blob.object_id(),
                        name.clone(),
                    ));
                    pending.push(PendingObject::Blob(blob));
                }
                SnapshotEntry::Directory { name, snapshot } => {
                    let subtree = Tree::build(snapshot);
                    entries.push(TreeEntry::new(
                        ObjectType::Tree,
                        subtree.object_id(),
                        name.clone(),
                    ));
                    pending.push(PendingObject::Tree(subtree));
                }
            }
        }

        entries.sort();

        Tree { entries, pending }
    }

    /// Visit every pending object and then the tree itself (post-order)
    ///
    /// Children are visited before their parent so that a stored tree never
    /// references an object that is not yet in the database.
    pub fn traverse<F>(&self, func: &mut F) -> Result<()>
    where
        F: FnMut(&dyn Object) -> Result<()>,
    {
        for object in &self.pending {
            match object {
                PendingObject::Blob(blob) => func(blob)?,
                PendingObject::Tree(tree) => tree.traverse(func)?,
            }
        }

        func(self)
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Tree {}

impl Packable for Tree {
    fn content(&self) -> Bytes {
        self.entries
            .iter()
            .map(TreeEntry::to_line)
            .collect::<String>()
            .into()
    }
}

impl Unpackable for Tree {
    fn deserialize(oid: &ObjectId, content: Bytes) -> Result<Self> {
        let corrupt = |reason: String| RepositoryError::CorruptObject {
            oid: oid.clone(),
            reason,
        };

        let content = std::str::from_utf8(&content)
            .map_err(|_| corrupt("tree content is not valid UTF-8".to_string()))?;

        // entries end in '\n' only; a '\r' belongs to the name
        let entries = content
            .split_terminator('\n')
            .map(|line| {
                let mut parts = line.splitn(3, ' ');
                let (Some(entry_type), Some(entry_oid), Some(name)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(corrupt(format!("malformed tree entry '{line}'")));
                };

                let entry_type = match ObjectType::try_from(entry_type).map_err(corrupt)? {
                    ObjectType::Commit => {
                        return Err(corrupt(format!("tree entry '{name}' references a commit")));
                    }
                    entry_type => entry_type,
                };
                let entry_oid = ObjectId::try_parse(entry_oid)
                    .map_err(|_| corrupt(format!("invalid object id in entry '{name}'")))?;

                if name.is_empty() {
                    return Err(corrupt("tree entry with empty name".to_string()));
                }

                Ok(TreeEntry::new(entry_type, entry_oid, name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Tree {
            entries,
            pending: Vec::new(),
        })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(64)).unwrap()
    }

    #[test]
    fn entries_sort_by_type_then_id_then_name() {
        let tree = Tree::new(vec![
            TreeEntry::new(ObjectType::Tree, oid('1'), "a-dir".to_string()),
            TreeEntry::new(ObjectType::Blob, oid('f'), "b.txt".to_string()),
            TreeEntry::new(ObjectType::Blob, oid('2'), "z.txt".to_string()),
        ]);

        let names = tree.entries().map(TreeEntry::name).collect::<Vec<_>>();
        assert_eq!(names, vec!["z.txt", "b.txt", "a-dir"]);
    }

    #[test]
    fn content_has_one_line_per_entry() {
        let tree = Tree::new(vec![
            TreeEntry::new(ObjectType::Blob, oid('a'), "hello world.txt".to_string()),
            TreeEntry::new(ObjectType::Tree, oid('b'), "src".to_string()),
        ]);

        let expected = format!("blob {} hello world.txt\ntree {} src\n", oid('a'), oid('b'));
        assert_eq!(tree.content(), Bytes::from(expected));
    }

    #[test]
    fn deserialize_reads_back_names_with_spaces() -> Result<()> {
        let tree = Tree::new(vec![
            TreeEntry::new(ObjectType::Blob, oid('a'), "with space.txt".to_string()),
            TreeEntry::new(ObjectType::Tree, oid('b'), "dir".to_string()),
        ]);

        let decoded = Tree::deserialize(&tree.object_id(), tree.content())?;

        assert_eq!(decoded, tree);
        assert_eq!(decoded.object_id(), tree.object_id());
        Ok(())
    }

    #[test]
    fn deserialize_keeps_trailing_carriage_return_in_names() -> Result<()> {
        let tree = Tree::new(vec![TreeEntry::new(ObjectType::Blob, oid('a'), "a\r".to_string())]);

        let decoded = Tree::deserialize(&tree.object_id(), tree.content())?;

        assert_eq!(decoded.entries().map(TreeEntry::name).collect::<Vec<_>>(), vec!["a\r"]);
        assert_eq!(decoded.object_id(), tree.object_id());
        Ok(())
    }

    #[test]
    fn empty_tree_has_empty_content() {
        let tree = Tree::build(&DirSnapshot::default());

        assert!(tree.is_empty());
        assert_eq!(&tree.serialize()[..], b"tree\0");
    }

    #[test]
    fn deserialize_rejects_commit_entries() {
        let content = Bytes::from(format!("commit {} x\n", oid('c')));
        let result = Tree::deserialize(&oid('0'), content);

        assert!(matches!(result, Err(RepositoryError::CorruptObject { .. })));
    }

    #[test]
    fn deserialize_rejects_truncated_lines() {
        let content = Bytes::from(format!("blob {}\n", oid('c')));
        let result = Tree::deserialize(&oid('0'), content);

        assert!(matches!(result, Err(RepositoryError::CorruptObject { .. })));
    }

    #[test]
    fn build_is_deterministic_regardless_of_snapshot_order() {
        let forward = DirSnapshot::new(vec![
            SnapshotEntry::file("a.txt", "A"),
            SnapshotEntry::directory("dir", DirSnapshot::new(vec![SnapshotEntry::file("b.txt", "B")])),
        ]);
        let backward = DirSnapshot::new(vec![
            SnapshotEntry::directory("dir", DirSnapshot::new(vec![SnapshotEntry::file("b.txt", "B")])),
            SnapshotEntry::file("a.txt", "A"),
        ]);

        assert_eq!(
            Tree::build(&forward).object_id(),
            Tree::build(&backward).object_id()
        );
    }

    #[test]
    fn traverse_visits_children_before_parent() -> Result<()> {
        let snapshot = DirSnapshot::new(vec![
            SnapshotEntry::file("a.txt", "A"),
            SnapshotEntry::directory("dir", DirSnapshot::new(vec![SnapshotEntry::file("b.txt", "B")])),
        ]);
        let tree = Tree::build(&snapshot);

        let mut visited = Vec::new();
        tree.traverse(&mut |object: &dyn Object| {
            visited.push(object.object_type());
            Ok(())
        })?;

        assert_eq!(
            visited,
            vec![
                ObjectType::Blob,
                ObjectType::Blob,
                ObjectType::Tree,
                ObjectType::Tree
            ]
        );
        Ok(())
    }
}
