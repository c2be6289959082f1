//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shared::models::SupplierRegistration;

use crate::error::AppResult;
use crate::services::auth::{AuthTokens, RegisterResponse};
use crate::services::AuthService;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthTokens>> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let tokens = auth_service.login(&body.username, &body.password).await?;
    Ok(Json(tokens))
}

/// Supplier onboarding endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<SupplierRegistration>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let result = auth_service.register_supplier(body).await?;
    Ok((StatusCode::CREATED, Json(result)))
}
