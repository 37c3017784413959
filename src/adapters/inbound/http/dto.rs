use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{
    errors::StorageError,
    models::{
        DeleteImageOutcome, DeletionFailure, OrphanPlan, ReconcileReport, StoredObject,
        UploadedImage,
    },
};

/// DTO for a cleanup run; `deleted` and `errors` are what the admin UI shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReportDto {
    pub deleted: usize,
    pub errors: Vec<String>,
    pub stage: String,
    pub succeeded: Vec<String>,
    pub failed: Vec<DeletionFailureDto>,
    pub skipped: Vec<String>,
    pub scanned: usize,
    pub referenced: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionFailureDto {
    pub key: String,
    pub error: String,
}

/// DTO for a dry run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphanPlanDto {
    pub orphans: Vec<StoredObjectDto>,
    pub skipped: Vec<StoredObjectDto>,
    pub scanned: usize,
    pub referenced: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObjectDto {
    pub key: String,
    pub size: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// DTO returned after an upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImageDto {
    pub key: String,
    pub url: String,
}

/// Query string for `DELETE /admin/images`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteImageQuery {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteImageResponseDto {
    pub deleted: bool,
    pub skipped: bool,
    pub key: Option<String>,
}

/// DTO for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    pub timestamp: DateTime<Utc>,
}

// Conversion implementations

impl From<ReconcileReport> for ReconcileReportDto {
    fn from(report: ReconcileReport) -> Self {
        Self {
            deleted: report.deleted,
            errors: report.errors,
            stage: report.stage.to_string(),
            succeeded: report.succeeded.iter().map(ToString::to_string).collect(),
            failed: report.failed.into_iter().map(Into::into).collect(),
            skipped: report.skipped.iter().map(ToString::to_string).collect(),
            scanned: report.scanned,
            referenced: report.referenced,
        }
    }
}

impl From<DeletionFailure> for DeletionFailureDto {
    fn from(failure: DeletionFailure) -> Self {
        Self {
            key: failure.key.to_string(),
            error: failure.error,
        }
    }
}

impl From<StoredObject> for StoredObjectDto {
    fn from(object: StoredObject) -> Self {
        Self {
            key: object.key.to_string(),
            size: object.size,
            created_at: object.created_at,
        }
    }
}

impl From<OrphanPlan> for OrphanPlanDto {
    fn from(plan: OrphanPlan) -> Self {
        Self {
            orphans: plan.orphans.into_iter().map(Into::into).collect(),
            skipped: plan.skipped.into_iter().map(Into::into).collect(),
            scanned: plan.scanned,
            referenced: plan.referenced,
        }
    }
}

impl From<UploadedImage> for UploadedImageDto {
    fn from(image: UploadedImage) -> Self {
        Self {
            key: image.key.to_string(),
            url: image.url,
        }
    }
}

impl From<DeleteImageOutcome> for DeleteImageResponseDto {
    fn from(outcome: DeleteImageOutcome) -> Self {
        match outcome {
            DeleteImageOutcome::Deleted { key } => Self {
                deleted: true,
                skipped: false,
                key: Some(key.to_string()),
            },
            DeleteImageOutcome::Skipped { .. } => Self {
                deleted: false,
                skipped: true,
                key: None,
            },
        }
    }
}

impl ErrorResponseDto {
    pub fn from_storage_error(error: StorageError) -> Self {
        let mut details = HashMap::new();

        match &error {
            StorageError::ObjectNotFound { key }
            | StorageError::ObjectAlreadyExists { key }
            | StorageError::AccessDenied { key, .. } => {
                details.insert(
                    "key".to_string(),
                    serde_json::Value::String(key.as_str().to_string()),
                );
            }
            _ => {}
        }

        ErrorResponseDto {
            error: "StorageError".to_string(),
            message: error.to_string(),
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
            timestamp: Utc::now(),
        }
    }

    pub fn from_reconcile_error(error: crate::domain::ReconcileError) -> Self {
        ErrorResponseDto {
            error: error.tag().to_string(),
            message: error.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        ErrorResponseDto {
            error: "BadRequest".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn payload_too_large(max_bytes: usize) -> Self {
        ErrorResponseDto {
            error: "PayloadTooLarge".to_string(),
            message: format!("Images must be at most {} bytes", max_bytes),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn unauthorized() -> Self {
        ErrorResponseDto {
            error: "Unauthorized".to_string(),
            message: "Missing or invalid admin credentials".to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }
}
