use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::{
    handlers::{delete_image, preview_cleanup, run_cleanup, upload_image},
    middleware::{require_admin, AdminToken},
};
use crate::{
    domain::models::MAX_IMAGE_BYTES,
    ports::services::{ImageCleanupService, ImageService},
};

/// Request body limit for uploads: the largest accepted image plus room for
/// multipart boundaries and headers
pub const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 64 * 1024;

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub cleanup_service: Arc<dyn ImageCleanupService>,
    pub image_service: Arc<dyn ImageService>,
    pub admin_token: AdminToken,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/cleanup-images", post(run_cleanup))
        .route("/cleanup-images/preview", get(preview_cleanup))
        .route(
            "/images",
            post(upload_image)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
                .delete(delete_image),
        )
        .route_layer(from_fn_with_state(state.admin_token.clone(), require_admin));

    Router::new()
        .route("/health", get(health))
        .nest("/admin", admin)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        // Add state for dependency injection
        .with_state(state)
}
