use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;

impl Repository {
    /// Read an object's type and payload
    ///
    /// Fails with `ObjectNotFound` for unknown IDs and with `TypeMismatch`
    /// when `expected_type` is given and differs.
    pub fn get_object(
        &self,
        oid: &ObjectId,
        expected_type: Option<ObjectType>,
    ) -> Result<(ObjectType, Bytes)> {
        self.database().get_object(oid, expected_type)
    }

    /// Read an object and decode it into a blob, tree or commit
    pub fn read_object(
        &self,
        oid: &ObjectId,
        expected_type: Option<ObjectType>,
    ) -> Result<ObjectBox> {
        let object = self.database().parse_object(oid, expected_type)?;
        tracing::debug!(%oid, object_type = %object.object_type(), "decoded object");

        Ok(object)
    }
}
