pub mod image;
pub mod product;
pub mod public_url;
pub mod reconcile;
pub mod stored_object;

pub use image::{
    DeleteImageOutcome, UploadImageRequest, UploadedImage, ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES,
};
pub use product::{ImageReferenceSet, ProductImageFields};
pub use public_url::{PublicUrlConvention, HOSTED_PUBLIC_PATH};
pub use reconcile::{
    DeletionFailure, OrphanPlan, ReconcileOptions, ReconcileReport, ReconcileStage,
    DEFAULT_GRACE_PERIOD_MINUTES,
};
pub use stored_object::{ListOptions, StoredObject, DEFAULT_LIST_LIMIT};
