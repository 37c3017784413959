mod image_cleanup_service_impl;
mod image_service_impl;

pub use image_cleanup_service_impl::ImageCleanupServiceImpl;
pub use image_service_impl::ImageServiceImpl;
