use crate::domain::{errors::StorageError, value_objects::ObjectKey};

/// Convert object_store errors to domain storage errors
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => match ObjectKey::new(path) {
                Ok(key) => StorageError::ObjectNotFound { key },
                Err(e) => StorageError::ValidationError {
                    message: format!("Invalid object path from store: {}", e),
                },
            },
            object_store::Error::AlreadyExists { path, .. } => match ObjectKey::new(path) {
                Ok(key) => StorageError::ObjectAlreadyExists { key },
                Err(e) => StorageError::ValidationError {
                    message: format!("Invalid object path from store: {}", e),
                },
            },
            object_store::Error::PermissionDenied { path, .. }
            | object_store::Error::Unauthenticated { path, .. } => match ObjectKey::new(path) {
                Ok(key) => StorageError::AccessDenied {
                    key,
                    operation: "storage".to_string(),
                },
                Err(e) => StorageError::ValidationError {
                    message: format!("Invalid object path from store: {}", e),
                },
            },
            _ => StorageError::InfrastructureError {
                message: format!("Object store operation failed: {}", err),
                source: Some(err.to_string()),
            },
        }
    }
}

/// Convert domain StorageError to HTTP status codes for API responses
impl From<StorageError> for http::StatusCode {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ObjectNotFound { .. } => http::StatusCode::NOT_FOUND,
            StorageError::ObjectAlreadyExists { .. } => http::StatusCode::CONFLICT,
            StorageError::ValidationError { .. } => http::StatusCode::BAD_REQUEST,
            StorageError::AccessDenied { .. } => http::StatusCode::FORBIDDEN,
            StorageError::RepositoryError { .. }
            | StorageError::InfrastructureError { .. } => http::StatusCode::BAD_GATEWAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_key() {
        let err = object_store::Error::NotFound {
            path: "products/a.jpg".to_string(),
            source: "missing".into(),
        };
        match StorageError::from(err) {
            StorageError::ObjectNotFound { key } => assert_eq!(key.as_str(), "products/a.jpg"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_codes() {
        let key = ObjectKey::new("products/a.jpg".to_string()).unwrap();
        assert_eq!(
            http::StatusCode::from(StorageError::ObjectAlreadyExists { key }),
            http::StatusCode::CONFLICT
        );
        assert_eq!(
            http::StatusCode::from(StorageError::ValidationError {
                message: "bad".to_string()
            }),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            http::StatusCode::from(StorageError::RepositoryError {
                message: "down".to_string()
            }),
            http::StatusCode::BAD_GATEWAY
        );
    }
}
