use async_trait::async_trait;
use bytes::Bytes;
use object_store::{
    path::Path as ObjectPath, Attribute, Attributes, ObjectMeta, ObjectStore as ApacheObjectStore,
    PutMode, PutOptions, PutPayload,
};
use std::sync::Arc;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{ListOptions, StoredObject},
        value_objects::ObjectKey,
    },
    ports::storage::ImageStore,
};

/// Adapter that implements our ImageStore trait using Apache object_store
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self { inner: store }
    }

    fn to_stored_object(meta: ObjectMeta) -> StorageResult<StoredObject> {
        let key = ObjectKey::new(meta.location.to_string()).map_err(|e| {
            StorageError::ValidationError {
                message: format!("Invalid object key from store: {}", e),
            }
        })?;

        Ok(StoredObject {
            key,
            size: meta.size,
            created_at: Some(meta.last_modified),
        })
    }
}

#[async_trait]
impl ImageStore for ApacheObjectStoreAdapter {
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let path = ObjectPath::from(key.as_str());

        let mut attributes = Attributes::new();
        if let Some(content_type) = content_type {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        let options = PutOptions {
            mode: PutMode::Create,
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| match e {
                object_store::Error::AlreadyExists { .. } => {
                    StorageError::ObjectAlreadyExists { key: key.clone() }
                }
                _ => StorageError::InfrastructureError {
                    message: format!("Failed to put object: {}", e),
                    source: Some(e.to_string()),
                },
            })?;

        Ok(())
    }

    async fn delete_object(&self, key: &ObjectKey) -> StorageResult<()> {
        let path = ObjectPath::from(key.as_str());

        match self.inner.delete(&path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_objects(
        &self,
        folder: &str,
        options: &ListOptions,
    ) -> StorageResult<Vec<StoredObject>> {
        let folder_path = ObjectPath::from(folder);

        // Delimited listing: only direct children of the folder, like the hosted API
        let listing = self
            .inner
            .list_with_delimiter(Some(&folder_path))
            .await
            .map_err(|e| StorageError::InfrastructureError {
                message: format!("Failed to list objects: {}", e),
                source: Some(e.to_string()),
            })?;

        let mut objects = listing
            .objects
            .into_iter()
            .map(Self::to_stored_object)
            .collect::<StorageResult<Vec<_>>>()?;

        objects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        objects.truncate(options.limit);

        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn key(value: &str) -> ObjectKey {
        ObjectKey::new(value.to_string()).unwrap()
    }

    async fn adapter_with(keys: &[&str]) -> ApacheObjectStoreAdapter {
        let adapter = ApacheObjectStoreAdapter::new(Arc::new(InMemory::new()));
        for k in keys {
            adapter
                .put_object(&key(k), Bytes::from_static(b"img"), Some("image/jpeg"))
                .await
                .unwrap();
            // keep last_modified strictly increasing
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        adapter
    }

    #[tokio::test]
    async fn test_lists_direct_children_newest_first() {
        let adapter =
            adapter_with(&["products/a.jpg", "products/b.jpg", "products/thumbs/t.jpg", "banners/x.jpg"])
                .await;

        let listed = adapter
            .list_objects("products", &ListOptions::default())
            .await
            .unwrap();
        let keys: Vec<_> = listed.iter().map(|o| o.key.as_str()).collect();

        assert_eq!(keys, vec!["products/b.jpg", "products/a.jpg"]);
        assert!(listed.iter().all(|o| o.created_at.is_some() && o.size == 3));
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let adapter = adapter_with(&["products/a.jpg", "products/b.jpg", "products/c.jpg"]).await;

        let listed = adapter
            .list_objects("products", &ListOptions { limit: 2 })
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].key.as_str(), "products/c.jpg");
    }

    #[tokio::test]
    async fn test_put_never_overwrites() {
        let adapter = adapter_with(&["products/a.jpg"]).await;

        let err = adapter
            .put_object(&key("products/a.jpg"), Bytes::from_static(b"new"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::ObjectAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let adapter = adapter_with(&["products/a.jpg"]).await;

        adapter.delete_object(&key("products/a.jpg")).await.unwrap();
        adapter.delete_object(&key("products/a.jpg")).await.unwrap();

        let listed = adapter
            .list_objects("products", &ListOptions::default())
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}
