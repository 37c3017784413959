pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    DomainValidationError,
    // Models
    ImageReferenceSet,
    ObjectKey,
    OrphanPlan,
    ProductImageFields,
    PublicUrlConvention,
    // Errors
    ReconcileError,
    ReconcileOptions,
    ReconcileReport,
    ReconcileStage,
    StorageError,
    StoredObject,
};

// Port types - interfaces for external systems
pub use ports::{ImageCleanupService, ImageService, ImageStore, ProductRepository};

// Service implementations - business logic
pub use services::{ImageCleanupServiceImpl, ImageServiceImpl};

// Application factory and configuration
pub use app::{
    create_in_memory_app, AppBuilder, AppConfig, AppDependencies, AppError, AppServices,
    ImageSettings, RepositoryBackend, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    persistence::{InMemoryProductRepository, SqlProductRepository},
    storage::ApacheObjectStoreAdapter,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, ApacheObjectStoreAdapter, AppBuilder, AppServices,
        ImageCleanupService, ImageCleanupServiceImpl, ImageService, ImageServiceImpl,
        ImageSettings, ImageStore, InMemoryProductRepository, ObjectKey, ProductImageFields,
        ProductRepository, PublicUrlConvention, ReconcileReport,
    };
}
