//! Blob object
//!
//! Blobs store file content and nothing else; names live in trees.
//!
//! ## Format
//!
//! On disk: `blob\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    #[new(into)]
    content: Bytes,
}

impl Blob {
    pub fn data(&self) -> &Bytes {
        &self.content
    }

    pub fn into_data(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn content(&self) -> Bytes {
        self.content.clone()
    }
}

impl Unpackable for Blob {
    fn deserialize(_oid: &ObjectId, content: Bytes) -> Result<Self> {
        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}
