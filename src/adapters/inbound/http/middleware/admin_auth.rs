use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::adapters::inbound::http::dto::ErrorResponseDto;

/// Shared secret admin requests must present as `Authorization: Bearer <token>`
#[derive(Clone)]
pub struct AdminToken(Arc<str>);

impl AdminToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::from(token.into()))
    }

    /// Constant-time comparison against the configured token
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl std::fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminToken(***)")
    }
}

/// Reject requests without a valid admin bearer token
pub async fn require_admin(
    State(token): State<AdminToken>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponseDto>)> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|presented| token.matches(presented.trim()));

    if !authorized {
        warn!(path = %request.uri().path(), "rejected admin request without valid token");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponseDto::unauthorized()),
        ));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matching() {
        let token = AdminToken::new("s3cret-token");
        assert!(token.matches("s3cret-token"));
        assert!(!token.matches("s3cret-tokem"));
        assert!(!token.matches("s3cret"));
        assert!(!token.matches(""));
        assert!(!token.matches("s3cret-token-extra"));
        assert!(!token.matches("S3CRET-TOKEN"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let token = AdminToken::new("s3cret-token");
        assert_eq!(format!("{:?}", token), "AdminToken(***)");
    }
}
