use bytes::Bytes;

use crate::domain::{errors::ValidationError, value_objects::ObjectKey};

/// Largest image the admin UI accepts
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Raster formats served from the public bucket. SVG is excluded since it can
/// carry script.
pub const ALLOWED_IMAGE_TYPES: [&str; 5] =
    ["image/png", "image/jpeg", "image/webp", "image/gif", "image/avif"];

const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "avif"];

/// An image received from the admin UI
#[derive(Debug, Clone)]
pub struct UploadImageRequest {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadImageRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data.is_empty() {
            return Err(ValidationError::EmptyUpload);
        }
        if self.data.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge {
                actual: self.data.len(),
                max: MAX_IMAGE_BYTES,
            });
        }

        // Ignore parameters such as `; charset=...`
        let mime = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !ALLOWED_IMAGE_TYPES.contains(&mime.as_str()) {
            return Err(ValidationError::NotAnImage {
                content_type: self.content_type.clone(),
            });
        }

        let extension = self.extension()?;
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationError::UnsupportedImageExtension(extension));
        }
        Ok(())
    }

    /// Lowercased extension of the original file name
    pub fn extension(&self) -> Result<String, ValidationError> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ValidationError::MissingFileExtension(self.file_name.clone()))
    }
}

/// A stored image and the URL products should reference it by
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub key: ObjectKey,
    pub url: String,
}

/// Result of deleting an image by its public URL
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteImageOutcome {
    Deleted { key: ObjectKey },
    /// The URL does not point into the managed bucket; nothing was touched
    Skipped { url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(file_name: &str, content_type: &str, data: &'static [u8]) -> UploadImageRequest {
        UploadImageRequest {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(request("Rosa Roja.JPG", "image/jpeg", b"x").extension().unwrap(), "jpg");
        assert!(request("noext", "image/jpeg", b"x").extension().is_err());
        assert!(request("bad.", "image/jpeg", b"x").extension().is_err());
        assert!(request("evil.j/pg", "image/jpeg", b"x").extension().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(request("a.png", "image/png", b"png").validate().is_ok());
        assert_eq!(
            request("a.png", "image/png", b"").validate(),
            Err(ValidationError::EmptyUpload)
        );
        assert!(matches!(
            request("a.pdf", "application/pdf", b"%PDF").validate(),
            Err(ValidationError::NotAnImage { .. })
        ));
        assert!(request("a.JPG", "Image/JPEG", b"jpg").validate().is_ok());
    }

    #[test]
    fn test_svg_is_rejected() {
        assert!(matches!(
            request("logo.svg", "image/svg+xml", b"<svg/>").validate(),
            Err(ValidationError::NotAnImage { .. })
        ));
        assert_eq!(
            request("logo.svg", "image/png", b"<svg/>").validate(),
            Err(ValidationError::UnsupportedImageExtension("svg".to_string()))
        );
    }

    #[test]
    fn test_size_limit() {
        let at_limit = UploadImageRequest {
            file_name: "big.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: Bytes::from(vec![0u8; MAX_IMAGE_BYTES]),
        };
        assert!(at_limit.validate().is_ok());

        let over = UploadImageRequest {
            data: Bytes::from(vec![0u8; MAX_IMAGE_BYTES + 1]),
            ..at_limit
        };
        assert_eq!(
            over.validate(),
            Err(ValidationError::ImageTooLarge {
                actual: MAX_IMAGE_BYTES + 1,
                max: MAX_IMAGE_BYTES
            })
        );
    }
}
