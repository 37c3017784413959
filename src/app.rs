use object_store::memory::InMemory;
use std::sync::Arc;

use crate::{
    adapters::{
        inbound::http::{AdminToken, AppState},
        outbound::{
            persistence::{InMemoryProductRepository, SqlProductRepository},
            storage::{create_s3_store, ApacheObjectStoreAdapter, S3Config},
        },
    },
    domain::{
        models::{PublicUrlConvention, ReconcileOptions},
        value_objects::BucketName,
    },
    ports::{repositories::ProductRepository, storage::ImageStore},
    services::{ImageCleanupServiceImpl, ImageServiceImpl},
};

/// Folder inside the bucket that product images live in
pub const DEFAULT_IMAGE_FOLDER: &str = "products";

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    pub images: ImageSettings,
    pub reconcile: ReconcileOptions,
}

impl AppConfig {
    /// In-memory backends, useful for tests and local development
    pub fn in_memory(images: ImageSettings) -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            images,
            reconcile: ReconcileOptions::default(),
        }
    }
}

/// Where images are stored and how their public URLs look
#[derive(Debug, Clone)]
pub struct ImageSettings {
    /// Base of every public image URL, e.g. the hosted project URL
    pub public_base_url: String,
    /// Path between the base URL and the bucket; empty for plain `{base}/{bucket}/{key}`
    pub public_path: String,
    pub bucket: String,
    pub folder: String,
}

impl ImageSettings {
    pub fn url_convention(&self) -> Result<PublicUrlConvention, AppError> {
        let bucket = BucketName::new(self.bucket.clone()).map_err(|e| AppError::Configuration {
            message: format!("invalid image bucket '{}': {}", self.bucket, e),
        })?;

        PublicUrlConvention::with_public_path(&self.public_base_url, &self.public_path, bucket)
            .map_err(|e| AppError::Configuration {
                message: format!("invalid public image URL settings: {}", e),
            })
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3(S3Config),
}

/// Repository backend configuration
#[derive(Debug, Clone)]
pub enum RepositoryBackend {
    InMemory,
    Database { connection_string: String },
}

/// Application dependencies container
#[derive(Clone)]
pub struct AppDependencies {
    pub image_store: Arc<dyn ImageStore>,
    pub product_repository: Arc<dyn ProductRepository>,
}

/// Application services container
#[derive(Clone)]
pub struct AppServices {
    pub cleanup_service: ImageCleanupServiceImpl,
    pub image_service: ImageServiceImpl,
}

impl AppServices {
    /// Router state guarded by the given admin token
    pub fn into_state(self, admin_token: AdminToken) -> AppState {
        AppState {
            cleanup_service: Arc::new(self.cleanup_service),
            image_service: Arc::new(self.image_service),
            admin_token,
        }
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    image_store: Option<Arc<dyn ImageStore>>,
    product_repository: Option<Arc<dyn ProductRepository>>,
}

impl AppBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            image_store: None,
            product_repository: None,
        }
    }

    pub fn with_reconcile_options(mut self, options: ReconcileOptions) -> Self {
        self.config.reconcile = options;
        self
    }

    /// Use an already constructed store instead of the configured backend
    pub fn with_image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    /// Use an already constructed repository instead of the configured backend
    pub fn with_product_repository(mut self, repository: Arc<dyn ProductRepository>) -> Self {
        self.product_repository = Some(repository);
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        let image_store = match &self.image_store {
            Some(store) => store.clone(),
            None => self.create_image_store()?,
        };

        let product_repository = match &self.product_repository {
            Some(repository) => repository.clone(),
            None => self.create_product_repository().await?,
        };

        Ok(AppDependencies {
            image_store,
            product_repository,
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let convention = self.config.images.url_convention()?;
        let deps = self.build_dependencies().await?;
        let folder = self.config.images.folder.clone();

        let cleanup_service = ImageCleanupServiceImpl::new(
            deps.image_store.clone(),
            deps.product_repository.clone(),
            convention.clone(),
            folder.clone(),
        )
        .with_options(self.config.reconcile.clone());

        let image_service = ImageServiceImpl::new(deps.image_store.clone(), convention, folder);

        Ok(AppServices {
            cleanup_service,
            image_service,
        })
    }

    fn create_image_store(&self) -> Result<Arc<dyn ImageStore>, AppError> {
        let backend: Arc<dyn object_store::ObjectStore> = match &self.config.storage_backend {
            StorageBackend::InMemory => Arc::new(InMemory::new()),
            StorageBackend::S3(s3) => create_s3_store(s3).map_err(|e| AppError::StorageInit {
                message: format!("{:#}", e),
            })?,
        };

        Ok(Arc::new(ApacheObjectStoreAdapter::new(backend)))
    }

    async fn create_product_repository(&self) -> Result<Arc<dyn ProductRepository>, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryProductRepository::new())),
            RepositoryBackend::Database { connection_string } => {
                let repository = SqlProductRepository::connect(connection_string)
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: e.to_string(),
                    })?;
                Ok(Arc::new(repository))
            }
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app(images: ImageSettings) -> Result<AppServices, AppError> {
    AppBuilder::new(AppConfig::in_memory(images)).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::services::ImageCleanupService;

    fn images() -> ImageSettings {
        ImageSettings {
            public_base_url: "https://x".to_string(),
            public_path: String::new(),
            bucket: "store".to_string(),
            folder: DEFAULT_IMAGE_FOLDER.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let app = create_in_memory_app(images()).await.unwrap();
        let report = app.cleanup_service.reconcile_orphaned_images().await;
        assert!(report.is_success());
        assert_eq!(report.deleted, 0);
    }

    #[tokio::test]
    async fn test_invalid_image_settings_fail_fast() {
        let mut settings = images();
        settings.public_base_url = String::new();
        let err = create_in_memory_app(settings).await.err().unwrap();
        assert!(matches!(err, AppError::Configuration { .. }));

        let mut settings = images();
        settings.bucket = "Bad Bucket".to_string();
        let err = create_in_memory_app(settings).await.err().unwrap();
        assert!(matches!(err, AppError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_builder_uses_injected_dependencies() {
        let repository = Arc::new(InMemoryProductRepository::new());
        repository.fail_with("offline").await;

        let store: Arc<dyn ImageStore> =
            Arc::new(ApacheObjectStoreAdapter::new(Arc::new(InMemory::new())));
        store
            .put_object(
                &crate::ObjectKey::in_folder("products", "a.jpg").unwrap(),
                bytes::Bytes::from_static(b"img"),
                None,
            )
            .await
            .unwrap();

        let app = AppBuilder::new(AppConfig::in_memory(images()))
            .with_image_store(store)
            .with_product_repository(repository)
            .build()
            .await
            .unwrap();

        let report = app.cleanup_service.reconcile_orphaned_images().await;
        assert!(report.errors[0].starts_with("ProductFetchError"));
    }
}
