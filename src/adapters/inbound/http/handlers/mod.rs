pub mod cleanup_handlers;
pub mod image_handlers;

pub use cleanup_handlers::*;
pub use image_handlers::*;
