use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::debug;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::ProductImageFields,
    },
    ports::repositories::ProductRepository,
};

/// Reads product image columns from the storefront's PostgreSQL `products` table.
/// The table itself is owned by the storefront; nothing here writes to it.
#[derive(Clone)]
pub struct SqlProductRepository {
    pool: PgPool,
}

impl SqlProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with a small pool; the admin service issues one query per run
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::RepositoryError {
            message: format!("Database error reading products: {}", err),
        }
    }
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn list_image_fields(&self) -> StorageResult<Vec<ProductImageFields>> {
        let rows = sqlx::query(
            r#"
            SELECT image_url, additional_images
            FROM products
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let products = rows
            .iter()
            .map(|row| -> StorageResult<ProductImageFields> {
                Ok(ProductImageFields {
                    image_url: row.try_get("image_url")?,
                    additional_images: row.try_get("additional_images")?,
                })
            })
            .collect::<StorageResult<Vec<_>>>()?;

        debug!(products = products.len(), "fetched product image fields");
        Ok(products)
    }
}
