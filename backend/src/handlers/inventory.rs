//! HTTP handlers for stock intake and the inventory report

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::intake::{IntakeRejection, QuantityInput};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::inventory::{IntakeOutcome, IntakeReceipt, InventoryFilter, InventoryListing};
use crate::services::{InventoryService, ReportingService};
use crate::AppState;

/// Body of an intake request
#[derive(Debug, Default, Deserialize)]
pub struct IntakeRequest {
    #[serde(default)]
    pub quantity: Option<QuantityInput>,
}

/// Absorb supplier stock of a product into inventory (admin)
///
/// A missing or unreadable body is treated as a request without a quantity.
pub async fn intake_stock(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(product_id): Path<Uuid>,
    body: Option<Json<IntakeRequest>>,
) -> AppResult<IntakeOutcome> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let span = tracing::info_span!(
        "stock_intake",
        admin_id = %admin.user_id,
        admin = %admin.username,
    );
    let service = InventoryService::new(state.db);
    service
        .intake(product_id, request.quantity.as_ref())
        .instrument(span)
        .await
}

#[derive(Serialize)]
struct IntakeSuccessBody {
    status: &'static str,
    #[serde(flatten)]
    receipt: IntakeReceipt,
}

#[derive(Serialize)]
struct IntakeRejectionBody {
    error: &'static str,
    message: String,
}

fn rejection_status(rejection: &IntakeRejection) -> StatusCode {
    match rejection {
        IntakeRejection::NotFound => StatusCode::NOT_FOUND,
        IntakeRejection::Unavailable | IntakeRejection::InsufficientStock { .. } => {
            StatusCode::CONFLICT
        }
        IntakeRejection::QuantityMissing | IntakeRejection::InvalidQuantity { .. } => {
            StatusCode::BAD_REQUEST
        }
    }
}

impl IntoResponse for IntakeOutcome {
    fn into_response(self) -> Response {
        match self {
            IntakeOutcome::Applied(receipt) => (
                StatusCode::OK,
                Json(IntakeSuccessBody {
                    status: "success",
                    receipt,
                }),
            )
                .into_response(),
            IntakeOutcome::Rejected(rejection) => (
                rejection_status(&rejection),
                Json(IntakeRejectionBody {
                    error: rejection.code(),
                    message: rejection.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Inventory report (admin); `format=csv` exports the filtered set
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(filter): Query<InventoryFilter>,
) -> AppResult<Response> {
    let service = InventoryService::new(state.db);
    let data = service.list(&filter).await?;

    if filter.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&data)?;
        Ok((
            [(header::CONTENT_TYPE, "text/csv"), (header::CONTENT_DISPOSITION, "attachment; filename=\"inventory.csv\"")],
            csv,
        ).into_response())
    } else {
        Ok(Json(data).into_response())
    }
}

/// Get one inventory row (admin)
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(inventory_id): Path<Uuid>,
) -> AppResult<Json<InventoryListing>> {
    let service = InventoryService::new(state.db);
    let inventory = service.get(inventory_id).await?;
    Ok(Json(inventory))
}
