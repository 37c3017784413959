use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::ProductImageFields,
    },
    ports::repositories::ProductRepository,
};

/// In-memory product catalog for testing and development
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    products: Vec<ProductImageFields>,
    // When set, every read fails with this message
    failure: Option<String>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<ProductImageFields>) -> Self {
        Self {
            data: Arc::new(RwLock::new(RepositoryData {
                products,
                failure: None,
            })),
        }
    }

    pub async fn insert(&self, product: ProductImageFields) {
        self.data.write().await.products.push(product);
    }

    pub async fn clear(&self) {
        self.data.write().await.products.clear();
    }

    /// Make subsequent reads fail, simulating an unreachable database
    pub async fn fail_with(&self, message: &str) {
        self.data.write().await.failure = Some(message.to_string());
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_image_fields(&self) -> StorageResult<Vec<ProductImageFields>> {
        let data = self.data.read().await;
        if let Some(message) = &data.failure {
            return Err(StorageError::RepositoryError {
                message: message.clone(),
            });
        }
        Ok(data.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list() {
        let repository = InMemoryProductRepository::new();
        repository
            .insert(ProductImageFields::new(Some("https://x/store/products/a.jpg"), &[]))
            .await;

        let products = repository.list_image_fields().await.unwrap();
        assert_eq!(products.len(), 1);

        repository.clear().await;
        assert!(repository.list_image_fields().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let repository = InMemoryProductRepository::new();
        repository.fail_with("connection refused").await;

        let err = repository.list_image_fields().await.unwrap_err();
        assert_eq!(err.to_string(), "Product repository error: connection refused");
    }
}
