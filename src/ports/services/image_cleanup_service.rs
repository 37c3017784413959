use async_trait::async_trait;

use crate::domain::{
    errors::ReconcileError,
    models::{OrphanPlan, ReconcileReport},
};

/// Service port for orphaned image reconciliation
#[async_trait]
pub trait ImageCleanupService: Send + Sync + 'static {
    /// List, collect and diff without deleting anything
    async fn find_orphans(&self) -> Result<OrphanPlan, ReconcileError>;

    /// Delete every stored image no product references.
    ///
    /// Never fails: aborted runs come back with `stage == Failed` and the
    /// cause in `errors`. Safe to re-run.
    async fn reconcile_orphaned_images(&self) -> ReconcileReport;
}
