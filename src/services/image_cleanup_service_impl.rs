use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::ReconcileError,
        models::{
            ImageReferenceSet, ListOptions, OrphanPlan, PublicUrlConvention, ReconcileOptions,
            ReconcileReport, ReconcileStage, StoredObject,
        },
    },
    ports::{repositories::ProductRepository, services::ImageCleanupService, storage::ImageStore},
};

/// Finds and deletes stored product images that no product references.
///
/// Stages run strictly one after another. The product snapshot is read after
/// the listing, so an image uploaded in between is protected only by the
/// grace period in [`ReconcileOptions`].
#[derive(Clone)]
pub struct ImageCleanupServiceImpl {
    store: Arc<dyn ImageStore>,
    repository: Arc<dyn ProductRepository>,
    convention: PublicUrlConvention,
    folder: String,
    options: ReconcileOptions,
}

/// Tracks the stage of one run
struct ReconcileRun {
    stage: ReconcileStage,
    started_at: DateTime<Utc>,
}

impl ReconcileRun {
    fn start() -> Self {
        Self {
            stage: ReconcileStage::Idle,
            started_at: Utc::now(),
        }
    }

    fn advance(&mut self, next: ReconcileStage) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "invalid reconcile transition {} -> {}",
            self.stage,
            next
        );
        debug!(from = %self.stage, to = %next, "reconcile stage");
        self.stage = next;
    }
}

impl ImageCleanupServiceImpl {
    pub fn new(
        store: Arc<dyn ImageStore>,
        repository: Arc<dyn ProductRepository>,
        convention: PublicUrlConvention,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            store,
            repository,
            convention,
            folder: folder.into(),
            options: ReconcileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    async fn list_folder(&self) -> Result<Vec<StoredObject>, ReconcileError> {
        let options = ListOptions {
            limit: self.options.page_size,
        };
        self.store
            .list_objects(&self.folder, &options)
            .await
            .map_err(|e| ReconcileError::StorageList {
                message: e.to_string(),
            })
    }

    async fn collect_references(&self) -> Result<ImageReferenceSet, ReconcileError> {
        let products = self
            .repository
            .list_image_fields()
            .await
            .map_err(|e| ReconcileError::ProductFetch {
                message: e.to_string(),
            })?;

        let references = ImageReferenceSet::collect(&products);
        debug!(
            products = products.len(),
            referenced = references.len(),
            "collected image references"
        );
        Ok(references)
    }

    fn diff(
        &self,
        listing: Vec<StoredObject>,
        references: &ImageReferenceSet,
        now: DateTime<Utc>,
    ) -> OrphanPlan {
        let mut plan = OrphanPlan {
            scanned: listing.len(),
            referenced: references.len(),
            ..Default::default()
        };

        for object in listing {
            if references.contains(&self.convention.url_for(&object.key)) {
                continue;
            }
            if object.is_recent(now, self.options.grace_period) {
                debug!(key = %object.key, "unreferenced image inside grace period, keeping");
                plan.skipped.push(object);
            } else {
                plan.orphans.push(object);
            }
        }

        plan
    }

    /// `Ok(None)` when the folder is empty
    async fn plan(&self, run: &mut ReconcileRun) -> Result<Option<OrphanPlan>, ReconcileError> {
        run.advance(ReconcileStage::Listing);
        let listing = self.list_folder().await?;
        if listing.is_empty() {
            return Ok(None);
        }

        run.advance(ReconcileStage::Collecting);
        let references = self.collect_references().await?;

        run.advance(ReconcileStage::Diffing);
        Ok(Some(self.diff(listing, &references, run.started_at)))
    }
}

#[async_trait]
impl ImageCleanupService for ImageCleanupServiceImpl {
    async fn find_orphans(&self) -> Result<OrphanPlan, ReconcileError> {
        let mut run = ReconcileRun::start();
        Ok(self.plan(&mut run).await?.unwrap_or_default())
    }

    #[tracing::instrument(skip(self), fields(folder = %self.folder, bucket = %self.convention.bucket()))]
    async fn reconcile_orphaned_images(&self) -> ReconcileReport {
        let mut run = ReconcileRun::start();

        let plan = match self.plan(&mut run).await {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                run.advance(ReconcileStage::Done);
                info!("image folder is empty, nothing to clean");
                return ReconcileReport::nothing_to_clean();
            }
            Err(error) => {
                run.advance(ReconcileStage::Failed);
                warn!(error = %error, "orphaned image cleanup aborted");
                return ReconcileReport::aborted(&error);
            }
        };

        let mut report = ReconcileReport::for_plan(&plan);
        if plan.is_empty() {
            run.advance(ReconcileStage::Done);
            info!(
                scanned = report.scanned,
                skipped = report.skipped.len(),
                "no orphaned images found"
            );
            return report;
        }

        run.advance(ReconcileStage::Deleting);
        info!(orphans = plan.orphans.len(), "deleting orphaned images");

        for orphan in plan.orphans {
            match self.store.delete_object(&orphan.key).await {
                Ok(()) => {
                    debug!(key = %orphan.key, "deleted orphaned image");
                    report.record_deleted(orphan.key);
                }
                Err(e) => {
                    warn!(key = %orphan.key, error = %e, "failed to delete orphaned image");
                    report.record_failure(ReconcileError::StorageDelete {
                        key: orphan.key,
                        message: e.to_string(),
                    });
                }
            }
        }

        run.advance(ReconcileStage::Done);
        report.stage = run.stage;

        info!(
            scanned = report.scanned,
            deleted = report.deleted,
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            "orphaned image cleanup finished"
        );
        report
    }
}
