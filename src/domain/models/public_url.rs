//! Public URL convention for stored product images.
//!
//! Upload and reconciliation must build URLs the same way: products store the
//! URL returned at upload time, and the reconciler compares reconstructed URLs
//! against them byte for byte.

use crate::domain::{
    errors::ValidationError,
    value_objects::{BucketName, ObjectKey},
};

/// Path segment the hosted storage service serves public objects under
pub const HOSTED_PUBLIC_PATH: &str = "storage/v1/object/public";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrlConvention {
    bucket: BucketName,
    /// `{base}/{public_path}/{bucket}/`, computed once
    url_prefix: String,
}

impl PublicUrlConvention {
    /// URLs of the form `{base_url}/{bucket}/{key}`
    pub fn new(base_url: &str, bucket: BucketName) -> Result<Self, ValidationError> {
        Self::with_public_path(base_url, "", bucket)
    }

    /// URLs of the form `{project_url}/storage/v1/object/public/{bucket}/{key}`
    pub fn hosted(project_url: &str, bucket: BucketName) -> Result<Self, ValidationError> {
        Self::with_public_path(project_url, HOSTED_PUBLIC_PATH, bucket)
    }

    /// URLs of the form `{base_url}/{public_path}/{bucket}/{key}`.
    /// An empty `public_path` is omitted.
    pub fn with_public_path(
        base_url: &str,
        public_path: &str,
        bucket: BucketName,
    ) -> Result<Self, ValidationError> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ValidationError::EmptyBaseUrl);
        }
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ValidationError::BaseUrlMissingScheme(base.to_string()));
        }

        let public_path = public_path.trim_matches('/');
        let url_prefix = if public_path.is_empty() {
            format!("{}/{}/", base, bucket)
        } else {
            format!("{}/{}/{}/", base, public_path, bucket)
        };

        Ok(Self { bucket, url_prefix })
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    pub fn url_for(&self, key: &ObjectKey) -> String {
        format!("{}{}", self.url_prefix, key)
    }

    /// Inverse of [`url_for`](Self::url_for). `None` for URLs outside this bucket.
    pub fn key_for(&self, url: &str) -> Option<ObjectKey> {
        url.strip_prefix(&self.url_prefix)
            .and_then(|rest| ObjectKey::new(rest.to_string()).ok())
    }
}
