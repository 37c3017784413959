use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    errors::StorageResult,
    models::{ListOptions, StoredObject},
    value_objects::ObjectKey,
};

/// Port for the bucket holding product images
/// This abstracts the actual storage backend (S3, hosted storage, in-memory)
#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    /// Store a new object. Never overwrites an existing key.
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()>;

    /// Delete one object. Deleting a missing key succeeds.
    async fn delete_object(&self, key: &ObjectKey) -> StorageResult<()>;

    /// List the objects directly inside `folder`, newest first, at most `options.limit`
    async fn list_objects(
        &self,
        folder: &str,
        options: &ListOptions,
    ) -> StorageResult<Vec<StoredObject>>;
}
