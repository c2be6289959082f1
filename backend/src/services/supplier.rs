//! Supplier service: onboarding lives in the auth service, everything else here

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{SupplierDraft, SupplierPatch};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::product::{Product, ProductService};

/// Supplier service for profiles and the admin supplier directory
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Supplier profile joined with its account username
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub phone_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    fn draft(&self) -> SupplierDraft {
        SupplierDraft {
            phone_number: self.phone_number.clone(),
            address: self.address.clone(),
        }
    }
}

/// Supplier with the products it lists
#[derive(Debug, Clone, Serialize)]
pub struct SupplierDetail {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub products: Vec<Product>,
}

/// Filters for the supplier directory
#[derive(Debug, Default, Deserialize)]
pub struct SupplierFilter {
    pub username: Option<String>,
    pub phone_number: Option<String>,
}

const SUPPLIER_COLUMNS: &str = r#"
    s.id, s.user_id, u.username, s.phone_number, s.address, s.created_at, s.updated_at
"#;

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List suppliers, optionally filtered by username or phone number fragment
    pub async fn list(&self, filter: &SupplierFilter) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            SELECT {SUPPLIER_COLUMNS}
            FROM suppliers s
            JOIN users u ON u.id = s.user_id
            WHERE ($1::text IS NULL OR u.username ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR s.phone_number ILIKE '%' || $2 || '%')
            ORDER BY u.username
            "#
        ))
        .bind(non_blank(&filter.username))
        .bind(non_blank(&filter.phone_number))
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// Get a supplier by id
    pub async fn get(&self, supplier_id: Uuid) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(&format!(
            r#"
            SELECT {SUPPLIER_COLUMNS}
            FROM suppliers s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = $1
            "#
        ))
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// Get a supplier together with its products
    pub async fn get_detail(&self, supplier_id: Uuid) -> AppResult<SupplierDetail> {
        let supplier = self.get(supplier_id).await?;
        let products = ProductService::new(self.db.clone())
            .list_for_supplier(supplier_id)
            .await?;

        Ok(SupplierDetail { supplier, products })
    }

    /// Edit a supplier profile; the edited profile is validated before it is saved
    pub async fn update_profile(
        &self,
        supplier_id: Uuid,
        patch: SupplierPatch,
    ) -> AppResult<Supplier> {
        let existing = self.get(supplier_id).await?;

        let draft = existing.draft().apply(patch);
        draft.validate()?;

        sqlx::query(
            r#"
            UPDATE suppliers
            SET phone_number = $1, address = $2
            WHERE id = $3
            "#,
        )
        .bind(&draft.phone_number)
        .bind(&draft.address)
        .bind(supplier_id)
        .execute(&self.db)
        .await?;

        self.get(supplier_id).await
    }

    /// Delete a supplier by deleting its owning account
    ///
    /// The schema cascades to the supplier, its products, and their inventory.
    pub async fn delete(&self, supplier_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM users WHERE id = (SELECT user_id FROM suppliers WHERE id = $1)",
        )
        .bind(supplier_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        tracing::info!(%supplier_id, "supplier account deleted");
        Ok(())
    }
}

/// Treat empty query parameters as absent
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
