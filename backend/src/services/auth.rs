//! Authentication service for supplier onboarding, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use shared::models::{AccessRole, SupplierDraft, SupplierRegistration};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub role: AccessRole,
    pub supplier_id: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role: AccessRole,
}

/// Response after successful supplier registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub supplier_id: Uuid,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

/// Account joined with its optional supplier profile
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    password_hash: String,
    is_admin: bool,
    supplier_id: Option<Uuid>,
}

/// Decode and validate a JWT access token
pub fn decode_claims(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Onboard a supplier: account and supplier profile are created together
    pub async fn register_supplier(
        &self,
        input: SupplierRegistration,
    ) -> AppResult<RegisterResponse> {
        input.validate()?;
        let profile = SupplierDraft {
            phone_number: input.phone_number.trim().to_string(),
            address: input.address,
        };
        profile.validate()?;

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let mut tx = self.db.begin().await?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&input.username)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let supplier_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO suppliers (user_id, phone_number, address)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(&profile.phone_number)
        .bind(&profile.address)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(%user_id, %supplier_id, username = %input.username, "supplier registered");

        let tokens = self.generate_tokens(
            user_id,
            &input.username,
            AccessRole::Supplier,
            Some(supplier_id),
        )?;

        Ok(RegisterResponse {
            user_id,
            supplier_id,
            tokens,
        })
    }

    /// Authenticate with username and password
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthTokens> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT u.id, u.username, u.password_hash, u.is_admin, s.id AS supplier_id
            FROM users u
            LEFT JOIN suppliers s ON s.user_id = u.id
            WHERE u.username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(password, &account.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let role = AccessRole::classify(account.is_admin, account.supplier_id.is_some());
        if role == AccessRole::Anonymous {
            return Err(AppError::Unauthorized(
                "Account has neither administrator nor supplier access".to_string(),
            ));
        }

        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(account.id)
            .execute(&self.db)
            .await?;

        self.generate_tokens(account.id, &account.username, role, account.supplier_id)
    }

    /// Create the bootstrap administrator if no account with that username exists
    pub async fn ensure_admin(&self, username: &str, password: &str) -> AppResult<bool> {
        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, is_admin)
            VALUES ($1, $2, TRUE)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Generate an access token
    fn generate_tokens(
        &self,
        user_id: Uuid,
        username: &str,
        role: AccessRole,
        supplier_id: Option<Uuid>,
    ) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let access_exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role,
            supplier_id: supplier_id.map(|id| id.to_string()),
            exp: access_exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            role,
        })
    }
}
