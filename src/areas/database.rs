//! Object database
//!
//! Objects live in a flat directory, one file per object, named by the hex
//! digest of their serialized form (`<type> NUL <content>`). Files are
//! written once through a temp file + rename and never modified afterwards.

use crate::artifacts::core::write_atomically;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{self, Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::workspace::snapshot::{DirSnapshot, SnapshotEntry};
use crate::errors::{RepositoryError, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store raw data as an object of the given type and return its ID
    pub fn hash_object(&self, data: &[u8], object_type: ObjectType) -> Result<ObjectId> {
        let serialized = object::encode(object_type, data);
        let oid = object::digest(&serialized);

        self.write_object(&oid, &serialized)?;
        Ok(oid)
    }

    pub fn store(&self, object: &dyn Object) -> Result<ObjectId> {
        let serialized = object.serialize();
        let oid = object::digest(&serialized);

        self.write_object(&oid, &serialized)?;
        Ok(oid)
    }

    /// Store a freshly built tree together with every object it references
    pub fn store_tree(&self, tree: &Tree) -> Result<ObjectId> {
        tree.traverse(&mut |object: &dyn Object| self.store(object).map(|_| ()))?;

        Ok(tree.object_id())
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read an object, split into type and payload
    ///
    /// With `expected_type` set, an object of any other type is rejected with
    /// [`RepositoryError::TypeMismatch`].
    pub fn get_object(
        &self,
        oid: &ObjectId,
        expected_type: Option<ObjectType>,
    ) -> Result<(ObjectType, Bytes)> {
        let object_path = self.object_path(oid);
        let raw = match std::fs::read(&object_path) {
            Ok(raw) => Bytes::from(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(RepositoryError::ObjectNotFound(oid.clone()));
            }
            Err(source) => {
                return Err(RepositoryError::Io {
                    path: object_path,
                    source,
                });
            }
        };

        if object::digest(&raw) != *oid {
            return Err(RepositoryError::CorruptObject {
                oid: oid.clone(),
                reason: "content does not match its id".to_string(),
            });
        }

        let (object_type, offset) =
            ObjectType::split_header(&raw).ok_or_else(|| RepositoryError::CorruptObject {
                oid: oid.clone(),
                reason: "missing or unknown type header".to_string(),
            })?;

        match expected_type {
            Some(expected) if expected != object_type => Err(RepositoryError::TypeMismatch {
                oid: oid.clone(),
                expected,
                found: object_type,
            }),
            _ => Ok((object_type, raw.slice(offset..))),
        }
    }

    /// Read and decode an object into its typed form
    pub fn parse_object(
        &self,
        oid: &ObjectId,
        expected_type: Option<ObjectType>,
    ) -> Result<ObjectBox> {
        let (object_type, content) = self.get_object(oid, expected_type)?;

        ObjectBox::decode(oid, object_type, content)
    }

    pub fn parse_object_as_blob(&self, oid: &ObjectId) -> Result<Blob> {
        let (_, content) = self.get_object(oid, Some(ObjectType::Blob))?;

        Blob::deserialize(oid, content)
    }

    pub fn parse_object_as_tree(&self, oid: &ObjectId) -> Result<Tree> {
        let (_, content) = self.get_object(oid, Some(ObjectType::Tree))?;

        Tree::deserialize(oid, content)
    }

    pub fn parse_object_as_commit(&self, oid: &ObjectId) -> Result<Commit> {
        let (_, content) = self.get_object(oid, Some(ObjectType::Commit))?;

        Commit::deserialize(oid, content)
    }

    /// Load a whole tree, recursively, into memory
    ///
    /// Every referenced object is read and checked here, so a caller that
    /// only touches the file system afterwards cannot fail halfway because of
    /// a missing object.
    pub fn read_snapshot(&self, tree_oid: &ObjectId) -> Result<DirSnapshot> {
        let tree = self.parse_object_as_tree(tree_oid)?;

        let entries = tree
            .entries()
            .map(|entry| {
                Ok(match entry.entry_type() {
                    ObjectType::Tree => {
                        SnapshotEntry::directory(entry.name(), self.read_snapshot(entry.oid())?)
                    }
                    _ => SnapshotEntry::file(
                        entry.name(),
                        self.parse_object_as_blob(entry.oid())?.into_data(),
                    ),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DirSnapshot::new(entries))
    }

    fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.path.join(oid.to_path())
    }

    fn write_object(&self, oid: &ObjectId, serialized: &[u8]) -> Result<()> {
        let object_path = self.object_path(oid);

        // objects are immutable, an existing file already holds these bytes
        if object_path.exists() {
            return Ok(());
        }

        write_atomically(&object_path, serialized)?;
        tracing::debug!(%oid, bytes = serialized.len(), "stored object");

        Ok(())
    }
}
