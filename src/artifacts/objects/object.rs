use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;
use sha2::{Digest, Sha256};

pub trait Packable {
    /// Object payload, without the type header
    fn content(&self) -> Bytes;
}

pub trait Unpackable {
    /// Decode a payload whose header has already been stripped
    ///
    /// `oid` is only used to give context to decoding failures.
    fn deserialize(oid: &ObjectId, content: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Full on-disk representation: `<type> NUL <content>`
    fn serialize(&self) -> Bytes {
        encode(self.object_type(), &self.content())
    }

    fn object_id(&self) -> ObjectId {
        digest(&self.serialize())
    }
}

pub fn encode(object_type: ObjectType, content: &[u8]) -> Bytes {
    let header = object_type.as_str().as_bytes();

    let mut object_bytes = Vec::with_capacity(header.len() + 1 + content.len());
    object_bytes.extend_from_slice(header);
    object_bytes.push(b'\0');
    object_bytes.extend_from_slice(content);

    Bytes::from(object_bytes)
}

pub fn digest(serialized: &[u8]) -> ObjectId {
    let mut hasher = Sha256::new();
    hasher.update(serialized);

    ObjectId::from_digest(hasher.finalize().as_slice())
}

/// A decoded object of any type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    /// Validating parse of a payload into its typed representation
    pub fn decode(oid: &ObjectId, object_type: ObjectType, content: Bytes) -> Result<Self> {
        Ok(match object_type {
            ObjectType::Blob => ObjectBox::Blob(Box::new(Blob::deserialize(oid, content)?)),
            ObjectType::Tree => ObjectBox::Tree(Box::new(Tree::deserialize(oid, content)?)),
            ObjectType::Commit => ObjectBox::Commit(Box::new(Commit::deserialize(oid, content)?)),
        })
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}
