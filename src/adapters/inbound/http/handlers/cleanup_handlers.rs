use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::adapters::inbound::http::{
    dto::{ErrorResponseDto, OrphanPlanDto, ReconcileReportDto},
    router::AppState,
};

/// Run orphaned image cleanup.
///
/// Always answers 200: an aborted run is reported through `stage` and `errors`
/// so the admin UI can show a single summary message.
pub async fn run_cleanup(State(app_state): State<AppState>) -> Json<ReconcileReportDto> {
    info!("orphaned image cleanup requested");
    let report = app_state.cleanup_service.reconcile_orphaned_images().await;
    Json(report.into())
}

/// Show what a cleanup run would delete
pub async fn preview_cleanup(
    State(app_state): State<AppState>,
) -> Result<Json<OrphanPlanDto>, (StatusCode, Json<ErrorResponseDto>)> {
    let plan = app_state
        .cleanup_service
        .find_orphans()
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponseDto::from_reconcile_error(e)),
            )
        })?;

    Ok(Json(plan.into()))
}
