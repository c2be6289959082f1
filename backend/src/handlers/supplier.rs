//! HTTP handlers for supplier profiles and the admin supplier directory

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::models::SupplierPatch;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::supplier::{Supplier, SupplierDetail, SupplierFilter};
use crate::services::SupplierService;
use crate::AppState;

/// List suppliers (admin)
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(filter): Query<SupplierFilter>,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list(&filter).await?;
    Ok(Json(suppliers))
}

/// Get a supplier with its products (admin)
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<SupplierDetail>> {
    let service = SupplierService::new(state.db);
    let detail = service.get_detail(supplier_id).await?;
    Ok(Json(detail))
}

/// Delete a supplier and its account (admin)
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = SupplierService::new(state.db);
    service.delete(supplier_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the caller's own supplier profile
pub async fn get_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get(current_user.0.supplier_id()?).await?;
    Ok(Json(supplier))
}

/// Edit the caller's own supplier profile
pub async fn update_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(patch): Json<SupplierPatch>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service
        .update_profile(current_user.0.supplier_id()?, patch)
        .await?;
    Ok(Json(supplier))
}
