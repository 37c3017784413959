use bon::Builder;

use crate::domain::{
    errors::ReconcileError, models::stored_object::DEFAULT_LIST_LIMIT,
    models::stored_object::StoredObject, value_objects::ObjectKey,
};

/// Default age an object must reach before it can be removed as an orphan
pub const DEFAULT_GRACE_PERIOD_MINUTES: i64 = 15;

/// Tunables for a reconciliation run
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ReconcileOptions {
    /// Maximum number of objects inspected per run, newest first
    #[builder(default = DEFAULT_LIST_LIMIT)]
    pub page_size: usize,

    /// Objects younger than this are never deleted. Covers images that were
    /// uploaded but not yet attached to a product when the snapshot was taken.
    #[builder(default = chrono::Duration::minutes(DEFAULT_GRACE_PERIOD_MINUTES))]
    pub grace_period: chrono::Duration,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Progress of a reconciliation run.
///
/// `Idle → Listing → Collecting → Diffing → Deleting → Done`; listing and
/// collecting may end in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStage {
    Idle,
    Listing,
    Collecting,
    Diffing,
    Deleting,
    Done,
    Failed,
}

impl ReconcileStage {
    pub fn can_transition_to(self, next: ReconcileStage) -> bool {
        use ReconcileStage::*;
        matches!(
            (self, next),
            (Idle, Listing)
                | (Listing, Collecting)
                | (Listing, Done)
                | (Listing, Failed)
                | (Collecting, Diffing)
                | (Collecting, Failed)
                | (Diffing, Deleting)
                | (Diffing, Done)
                | (Deleting, Done)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReconcileStage::Idle => "idle",
            ReconcileStage::Listing => "listing",
            ReconcileStage::Collecting => "collecting",
            ReconcileStage::Diffing => "diffing",
            ReconcileStage::Deleting => "deleting",
            ReconcileStage::Done => "done",
            ReconcileStage::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ReconcileStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of list → collect → diff, before anything is deleted
#[derive(Debug, Clone, Default)]
pub struct OrphanPlan {
    /// Objects with no referencing product, eligible for deletion
    pub orphans: Vec<StoredObject>,
    /// Unreferenced objects still inside the grace period
    pub skipped: Vec<StoredObject>,
    /// Objects in the listing
    pub scanned: usize,
    /// Distinct URLs referenced by products
    pub referenced: usize,
}

impl OrphanPlan {
    pub fn is_empty(&self) -> bool {
        self.orphans.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeletionFailure {
    pub key: ObjectKey,
    pub error: String,
}

/// Summary handed back to whoever triggered the run
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileReport {
    pub stage: ReconcileStage,
    pub deleted: usize,
    pub errors: Vec<String>,
    pub succeeded: Vec<ObjectKey>,
    pub failed: Vec<DeletionFailure>,
    pub skipped: Vec<ObjectKey>,
    pub scanned: usize,
    pub referenced: usize,
}

impl ReconcileReport {
    /// Empty listing, nothing inspected
    pub fn nothing_to_clean() -> Self {
        Self {
            stage: ReconcileStage::Done,
            deleted: 0,
            errors: Vec::new(),
            succeeded: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
            scanned: 0,
            referenced: 0,
        }
    }

    /// Run stopped before any deletion
    pub fn aborted(error: &ReconcileError) -> Self {
        Self {
            stage: ReconcileStage::Failed,
            errors: vec![error.to_string()],
            ..Self::nothing_to_clean()
        }
    }

    /// Report for a plan whose deletions have not happened yet
    pub fn for_plan(plan: &OrphanPlan) -> Self {
        Self {
            skipped: plan.skipped.iter().map(|o| o.key.clone()).collect(),
            scanned: plan.scanned,
            referenced: plan.referenced,
            ..Self::nothing_to_clean()
        }
    }

    pub fn record_deleted(&mut self, key: ObjectKey) {
        self.succeeded.push(key);
        self.deleted = self.succeeded.len();
    }

    pub fn record_failure(&mut self, error: ReconcileError) {
        self.errors.push(error.to_string());
        if let ReconcileError::StorageDelete { key, message } = error {
            self.failed.push(DeletionFailure {
                key,
                error: message,
            });
        }
    }

    pub fn is_success(&self) -> bool {
        self.stage == ReconcileStage::Done && self.errors.is_empty()
    }
}
