//! Authentication middleware
//!
//! JWT authentication and the role-based access gate. The gate is a single
//! capability check parameterized by the required role; the router applies
//! it before any service is reached.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::models::AccessRole;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::auth::decode_claims;
use crate::AppState;

/// Authenticated user information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: AccessRole,
    pub supplier_id: Option<Uuid>,
}

impl AuthUser {
    /// The caller's supplier profile, required for supplier-scoped operations
    pub fn supplier_id(&self) -> AppResult<Uuid> {
        self.supplier_id.ok_or(AppError::InsufficientPermissions)
    }
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token.to_string(),
        None => {
            return AppError::Unauthorized("Missing or invalid Authorization header".to_string())
                .into_response()
        }
    };

    let auth_user = match authenticate(&token, &state.config.jwt.secret) {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(token: &str, secret: &str) -> AppResult<AuthUser> {
    let claims = decode_claims(token, secret)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
    let supplier_id = claims
        .supplier_id
        .as_deref()
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|_| AppError::InvalidToken)?;

    Ok(AuthUser {
        user_id,
        username: claims.username,
        role: claims.role,
        supplier_id,
    })
}

/// Capability check: may a caller (or no caller) enter an operation requiring `required`
pub fn check_role(user: Option<&AuthUser>, required: AccessRole) -> AppResult<()> {
    let role = user.map(|u| u.role).unwrap_or(AccessRole::Anonymous);
    let has_supplier_profile = user.is_some_and(|u| u.supplier_id.is_some());
    if role.admits(required, has_supplier_profile) {
        Ok(())
    } else {
        tracing::debug!(%role, %required, "access denied");
        Err(AppError::InsufficientPermissions)
    }
}

/// Route layer enforcing `check_role`
///
/// Use with `middleware::from_fn_with_state(AccessRole::Admin, require_role)`,
/// layered inside `auth_middleware`.
pub async fn require_role(
    State(required): State<AccessRole>,
    request: Request,
    next: Next,
) -> Response {
    match check_role(request.extensions().get::<AuthUser>(), required) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
