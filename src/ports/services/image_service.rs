use async_trait::async_trait;

use crate::domain::{
    errors::StorageResult,
    models::{DeleteImageOutcome, UploadImageRequest, UploadedImage},
};

/// Service port for product image upload and removal
#[async_trait]
pub trait ImageService: Send + Sync + 'static {
    /// Store an image under a fresh unique key and return its public URL
    async fn upload_image(&self, request: UploadImageRequest) -> StorageResult<UploadedImage>;

    /// Delete the image a public URL points at.
    /// URLs outside the managed bucket are skipped.
    async fn delete_image_by_url(&self, url: &str) -> StorageResult<DeleteImageOutcome>;
}
