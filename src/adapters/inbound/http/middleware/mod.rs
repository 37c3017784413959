mod admin_auth;

pub use admin_auth::{require_admin, AdminToken};
