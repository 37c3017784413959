use chrono::{DateTime, Utc};

use crate::domain::value_objects::ObjectKey;

/// Page size used by the hosted store's listing API
pub const DEFAULT_LIST_LIMIT: usize = 1000;

/// An entry returned by an image folder listing. Observed, never owned.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: ObjectKey,
    pub size: u64,
    /// Creation time when the backend reports one. Images are never
    /// overwritten, so a last-modified stamp serves as well.
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredObject {
    /// Whether the object was created less than `grace_period` before `now`.
    /// Objects with an unknown creation time count as recent.
    pub fn is_recent(&self, now: DateTime<Utc>, grace_period: chrono::Duration) -> bool {
        if grace_period <= chrono::Duration::zero() {
            return false;
        }
        match self.created_at {
            Some(created_at) => now - created_at < grace_period,
            None => true,
        }
    }
}

/// Options for listing an image folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of entries returned, newest first
    pub limit: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}
