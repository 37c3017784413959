/// Validation errors for domain value objects and upload requests
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey
    EmptyObjectKey,
    ObjectKeyTooLong { actual: usize, max: usize },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyContainsDoubleSlash,

    // BucketName
    BucketNameLength { actual: usize, min: usize, max: usize },
    BucketNameInvalidEdge(char),
    BucketNameInvalidCharacter(char),

    // Public URL convention
    EmptyBaseUrl,
    BaseUrlMissingScheme(String),

    // Image uploads
    EmptyUpload,
    NotAnImage { content_type: String },
    MissingFileExtension(String),
    UnsupportedImageExtension(String),
    ImageTooLarge { actual: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: {:?}", c)
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }

            ValidationError::BucketNameLength { actual, min, max } => {
                write!(
                    f,
                    "Bucket name must be {}-{} characters long, got {}",
                    min, max, actual
                )
            }
            ValidationError::BucketNameInvalidEdge(c) => {
                write!(
                    f,
                    "Bucket name must start and end with a lowercase letter or digit, found '{}'",
                    c
                )
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(f, "Invalid character in bucket name: '{}'", c)
            }

            ValidationError::EmptyBaseUrl => write!(f, "Public base URL cannot be empty"),
            ValidationError::BaseUrlMissingScheme(url) => {
                write!(f, "Public base URL must start with http:// or https://: {}", url)
            }

            ValidationError::EmptyUpload => write!(f, "Uploaded file is empty"),
            ValidationError::NotAnImage { content_type } => {
                write!(
                    f,
                    "Uploaded file is not a supported raster image (content type: {})",
                    content_type
                )
            }
            ValidationError::MissingFileExtension(name) => {
                write!(f, "File name has no extension: {}", name)
            }
            ValidationError::UnsupportedImageExtension(ext) => {
                write!(f, "Unsupported image file extension: .{}", ext)
            }
            ValidationError::ImageTooLarge { actual, max } => {
                write!(f, "Image is {} bytes, the limit is {} bytes", actual, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
