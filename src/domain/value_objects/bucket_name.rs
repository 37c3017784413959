use crate::domain::errors::ValidationError;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 63;

/// Name of the bucket holding product images.
///
/// Lowercase letters, digits, hyphens and underscores; must start and end with
/// a letter or digit. This covers both S3 names and the hosted store's names
/// such as `product-image`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let len = value.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(ValidationError::BucketNameLength {
                actual: len,
                min: MIN_LEN,
                max: MAX_LEN,
            });
        }

        let is_edge = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
        for edge in [value.chars().next(), value.chars().last()].into_iter().flatten() {
            if !is_edge(edge) {
                return Err(ValidationError::BucketNameInvalidEdge(edge));
            }
        }

        if let Some(c) = value
            .chars()
            .find(|&c| !(is_edge(c) || c == '-' || c == '_'))
        {
            return Err(ValidationError::BucketNameInvalidCharacter(c));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bucket_names() {
        assert!(BucketName::new("product-image".to_string()).is_ok());
        assert!(BucketName::new("store".to_string()).is_ok());
        assert!(BucketName::new("flores_2025".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_bucket_names() {
        assert!(matches!(
            BucketName::new("ab".to_string()),
            Err(ValidationError::BucketNameLength { actual: 2, .. })
        ));
        assert!(BucketName::new("a".repeat(64)).is_err());
        assert_eq!(
            BucketName::new("-images".to_string()),
            Err(ValidationError::BucketNameInvalidEdge('-'))
        );
        assert_eq!(
            BucketName::new("Images".to_string()),
            Err(ValidationError::BucketNameInvalidEdge('I'))
        );
        assert_eq!(
            BucketName::new("my bucket".to_string()),
            Err(ValidationError::BucketNameInvalidCharacter(' '))
        );
    }
}
