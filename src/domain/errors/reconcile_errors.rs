use crate::domain::value_objects::ObjectKey;

/// Errors raised by a reconciliation run.
///
/// `StorageList` and `ProductFetch` abort the run before anything is deleted.
/// `StorageDelete` is recorded per key and never stops the remaining deletions.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileError {
    /// The image folder could not be listed
    StorageList { message: String },

    /// The product snapshot could not be read
    ProductFetch { message: String },

    /// A single orphaned object could not be removed
    StorageDelete { key: ObjectKey, message: String },
}

impl ReconcileError {
    /// Stable tag used as the prefix of the rendered message
    pub fn tag(&self) -> &'static str {
        match self {
            ReconcileError::StorageList { .. } => "StorageListError",
            ReconcileError::ProductFetch { .. } => "ProductFetchError",
            ReconcileError::StorageDelete { .. } => "StorageDeleteError",
        }
    }
}

impl std::fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileError::StorageList { message } | ReconcileError::ProductFetch { message } => {
                write!(f, "{}: {}", self.tag(), message)
            }
            ReconcileError::StorageDelete { key, message } => {
                write!(f, "{}: {}: {}", self.tag(), key, message)
            }
        }
    }
}

impl std::error::Error for ReconcileError {}
