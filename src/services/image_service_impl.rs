use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    domain::{
        errors::StorageResult,
        models::{DeleteImageOutcome, PublicUrlConvention, UploadImageRequest, UploadedImage},
        value_objects::ObjectKey,
    },
    ports::{services::ImageService, storage::ImageStore},
};

/// Uploads and removes product images using the shared public URL convention
#[derive(Clone)]
pub struct ImageServiceImpl {
    store: Arc<dyn ImageStore>,
    convention: PublicUrlConvention,
    folder: String,
}

impl ImageServiceImpl {
    pub fn new(
        store: Arc<dyn ImageStore>,
        convention: PublicUrlConvention,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            store,
            convention,
            folder: folder.into(),
        }
    }

    /// `{unix millis}-{random}.{ext}`
    fn unique_file_name(extension: &str) -> String {
        format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        )
    }
}

#[async_trait]
impl ImageService for ImageServiceImpl {
    async fn upload_image(&self, request: UploadImageRequest) -> StorageResult<UploadedImage> {
        request.validate()?;
        let extension = request.extension()?;
        let key = ObjectKey::in_folder(&self.folder, &Self::unique_file_name(&extension))?;

        self.store
            .put_object(&key, request.data, Some(&request.content_type))
            .await?;

        let url = self.convention.url_for(&key);
        info!(key = %key, original = %request.file_name, "uploaded product image");

        Ok(UploadedImage { key, url })
    }

    async fn delete_image_by_url(&self, url: &str) -> StorageResult<DeleteImageOutcome> {
        let Some(key) = self.convention.key_for(url) else {
            debug!(url, "url is outside the image bucket, skipping delete");
            return Ok(DeleteImageOutcome::Skipped {
                url: url.to_string(),
            });
        };

        self.store.delete_object(&key).await?;
        info!(key = %key, "deleted product image");

        Ok(DeleteImageOutcome::Deleted { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::storage::ApacheObjectStoreAdapter,
        domain::{
            errors::StorageError,
            models::ListOptions,
            value_objects::BucketName,
        },
    };
    use bytes::Bytes;
    use object_store::memory::InMemory;

    fn setup() -> (Arc<ApacheObjectStoreAdapter>, ImageServiceImpl) {
        let store = Arc::new(ApacheObjectStoreAdapter::new(Arc::new(InMemory::new())));
        let convention = PublicUrlConvention::hosted(
            "https://demo.example.co",
            BucketName::new("product-image".to_string()).unwrap(),
        )
        .unwrap();
        let service = ImageServiceImpl::new(store.clone(), convention, "products");
        (store, service)
    }

    fn upload(file_name: &str, content_type: &str) -> UploadImageRequest {
        UploadImageRequest {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            data: Bytes::from_static(b"\x89PNG fake image"),
        }
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let (store, service) = setup();

        let uploaded = service
            .upload_image(upload("Ramo de Rosas.PNG", "image/png"))
            .await
            .unwrap();

        assert_eq!(uploaded.key.folder(), Some("products"));
        assert!(uploaded.key.file_name().ends_with(".png"));
        assert!(uploaded.url.starts_with(
            "https://demo.example.co/storage/v1/object/public/product-image/products/"
        ));

        let listed = store
            .list_objects("products", &ListOptions::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].key, uploaded.key);
    }

    #[tokio::test]
    async fn test_uploads_get_distinct_keys() {
        let (_, service) = setup();
        let first = service.upload_image(upload("a.jpg", "image/jpeg")).await.unwrap();
        let second = service.upload_image(upload("a.jpg", "image/jpeg")).await.unwrap();
        assert_ne!(first.key, second.key);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_images() {
        let (_, service) = setup();
        let err = service
            .upload_image(upload("notes.txt", "text/plain"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_delete_by_url() {
        let (store, service) = setup();
        let uploaded = service.upload_image(upload("a.webp", "image/webp")).await.unwrap();

        let outcome = service.delete_image_by_url(&uploaded.url).await.unwrap();
        assert_eq!(outcome, DeleteImageOutcome::Deleted { key: uploaded.key });

        let listed = store
            .list_objects("products", &ListOptions::default())
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_delete_skips_foreign_urls() {
        let (_, service) = setup();
        let url = "https://images.unsplash.com/photo-123.jpg";
        let outcome = service.delete_image_by_url(url).await.unwrap();
        assert_eq!(
            outcome,
            DeleteImageOutcome::Skipped {
                url: url.to_string()
            }
        );
    }
}
