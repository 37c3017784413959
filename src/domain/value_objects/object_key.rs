use crate::domain::errors::ValidationError;

const MAX_KEY_LEN: usize = 1024;

/// A validated object key inside the image bucket, e.g. `products/1700000000-ab12.jpg`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }
        if value.len() > MAX_KEY_LEN {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: MAX_KEY_LEN,
            });
        }
        if let Some(c) = value.chars().find(|c| c.is_control()) {
            return Err(ValidationError::InvalidObjectKeyCharacter(c));
        }
        if value.starts_with('/') {
            return Err(ValidationError::ObjectKeyStartsWithSlash);
        }
        if value.contains("//") {
            return Err(ValidationError::ObjectKeyContainsDoubleSlash);
        }

        Ok(Self(value))
    }

    /// Build `{folder}/{file_name}`; an empty folder yields the bare file name
    pub fn in_folder(folder: &str, file_name: &str) -> Result<Self, ValidationError> {
        let folder = folder.trim_matches('/');
        if folder.is_empty() {
            Self::new(file_name.to_string())
        } else {
            Self::new(format!("{}/{}", folder, file_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the last '/'
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(&self.0, |idx| &self.0[idx + 1..])
    }

    /// Everything before the last '/'
    pub fn folder(&self) -> Option<&str> {
        self.0.rfind('/').map(|idx| &self.0[..idx])
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_keys() {
        assert_eq!(
            ObjectKey::new(String::new()),
            Err(ValidationError::EmptyObjectKey)
        );
        assert!(ObjectKey::new("/products/a.jpg".to_string()).is_err());
        assert!(ObjectKey::new("products//a.jpg".to_string()).is_err());
        assert!(ObjectKey::new("products/a\0.jpg".to_string()).is_err());
        assert!(ObjectKey::new("p".repeat(MAX_KEY_LEN + 1)).is_err());
    }

    #[test]
    fn test_in_folder() {
        let key = ObjectKey::in_folder("products/", "a.jpg").unwrap();
        assert_eq!(key.as_str(), "products/a.jpg");
        assert_eq!(key.folder(), Some("products"));
        assert_eq!(key.file_name(), "a.jpg");

        let bare = ObjectKey::in_folder("", "a.jpg").unwrap();
        assert_eq!(bare.as_str(), "a.jpg");
        assert_eq!(bare.folder(), None);
    }
}
