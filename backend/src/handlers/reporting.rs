//! Reporting handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::reporting::{DashboardMetrics, ReportingService};
use crate::AppState;

/// Get dashboard metrics (admin)
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardMetrics>> {
    let service = ReportingService::new(state.db.clone());
    let metrics = service.get_dashboard_metrics().await?;
    Ok(Json(metrics))
}
