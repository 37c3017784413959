mod image_cleanup_service;
mod image_service;

pub use image_cleanup_service::ImageCleanupService;
pub use image_service::ImageService;
