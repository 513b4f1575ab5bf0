use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;

impl Repository {
    /// Store `data` as an object of type `object_type` and return its ID
    ///
    /// Storing the same data twice is a no-op that returns the same ID.
    pub fn hash_object(&self, data: &[u8], object_type: ObjectType) -> Result<ObjectId> {
        self.database().hash_object(data, object_type)
    }
}
