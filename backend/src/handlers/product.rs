//! HTTP handlers for products: supplier-owned CRUD and the admin browser

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use shared::models::{NewProduct, ProductPatch};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::product::{Product, ProductFilter};
use crate::services::{ProductService, ReportingService};
use crate::AppState;

/// Browse all products (admin); `format=csv` exports the filtered set
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Response> {
    let service = ProductService::new(state.db);

    if filter.format.as_deref() == Some("csv") {
        let data = service.list_all(&filter).await?;
        let csv = ReportingService::export_to_csv(&data)?;
        Ok((
            [(header::CONTENT_TYPE, "text/csv"), (header::CONTENT_DISPOSITION, "attachment; filename=\"products.csv\"")],
            csv,
        ).into_response())
    } else {
        let page = service.list(&filter).await?;
        Ok(Json(page).into_response())
    }
}

/// Get any product (admin)
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get(product_id).await?;
    Ok(Json(product))
}

/// List the caller's own products
pub async fn list_own_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service
        .list_for_supplier(current_user.0.supplier_id()?)
        .await?;
    Ok(Json(products))
}

/// Create a product for the caller
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<NewProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.db);
    let product = service
        .create(current_user.0.supplier_id()?, input)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get one of the caller's products
pub async fn get_own_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service
        .get_for_supplier(current_user.0.supplier_id()?, product_id)
        .await?;
    Ok(Json(product))
}

/// Edit one of the caller's products
pub async fn update_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(patch): Json<ProductPatch>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service
        .update(current_user.0.supplier_id()?, product_id, patch)
        .await?;
    Ok(Json(product))
}

/// Delete one of the caller's products
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service
        .delete(current_user.0.supplier_id()?, product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
