use async_trait::async_trait;

use crate::domain::{errors::StorageResult, models::ProductImageFields};

/// Read access to the product catalog's image columns
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Image fields of every product, active or not
    async fn list_image_fields(&self) -> StorageResult<Vec<ProductImageFields>>;
}
