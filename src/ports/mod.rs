pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use repositories::ProductRepository;
pub use services::{ImageCleanupService, ImageService};
pub use storage::ImageStore;
