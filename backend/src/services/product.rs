//! Product service: supplier-owned product CRUD and the admin product browser

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::intake::StockSnapshot;
use shared::models::{NewProduct, ProductDraft, ProductPatch};
use shared::types::{PaginatedResponse, Pagination};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::supplier::non_blank;

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Product record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub stock: i32,
    pub active_status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The persisted fields as a validatable draft
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            unit_price: self.unit_price,
            stock: self.stock,
            active_status: self.active_status,
        }
    }

    pub fn stock_snapshot(&self) -> StockSnapshot {
        StockSnapshot {
            stock: self.stock,
            active_status: self.active_status,
            unit_price: self.unit_price,
        }
    }
}

/// Product row for admin listings and exports
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductListing {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub stock: i32,
    pub active_status: bool,
}

/// Filters for the admin product browser
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub supplier: Option<String>,
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub format: Option<String>, // "json" or "csv"
}

pub(crate) const PRODUCT_COLUMNS: &str = r#"
    id, supplier_id, name, description, unit_price, stock, active_status, created_at, updated_at
"#;

const LISTING_FILTER: &str = r#"
    FROM products p
    JOIN suppliers s ON s.id = p.supplier_id
    JOIN users u ON u.id = s.user_id
    WHERE ($1::text IS NULL OR p.name ILIKE '%' || $1 || '%')
      AND ($2::text IS NULL OR u.username ILIKE '%' || $2 || '%')
      AND ($3::boolean IS NULL OR p.active_status = $3)
"#;

const LISTING_COLUMNS: &str = r#"
    p.id, p.supplier_id, u.username AS supplier_name, p.name, p.description,
    p.unit_price, p.stock, p.active_status
"#;

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Admin browsing
    // ------------------------------------------------------------------

    /// Page through all products
    pub async fn list(&self, filter: &ProductFilter) -> AppResult<PaginatedResponse<ProductListing>> {
        let pagination = Pagination::from_query(filter.page, filter.per_page);

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) {LISTING_FILTER}"))
            .bind(non_blank(&filter.name))
            .bind(non_blank(&filter.supplier))
            .bind(filter.active)
            .fetch_one(&self.db)
            .await?;

        let products = sqlx::query_as::<_, ProductListing>(&format!(
            "SELECT {LISTING_COLUMNS} {LISTING_FILTER} ORDER BY p.name, p.id LIMIT $4 OFFSET $5"
        ))
        .bind(non_blank(&filter.name))
        .bind(non_blank(&filter.supplier))
        .bind(filter.active)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse::new(
            products,
            &pagination,
            u64::try_from(total).unwrap_or(0),
        ))
    }

    /// All products matching a filter, unpaged, for export
    pub async fn list_all(&self, filter: &ProductFilter) -> AppResult<Vec<ProductListing>> {
        let products = sqlx::query_as::<_, ProductListing>(&format!(
            "SELECT {LISTING_COLUMNS} {LISTING_FILTER} ORDER BY p.name, p.id"
        ))
        .bind(non_blank(&filter.name))
        .bind(non_blank(&filter.supplier))
        .bind(filter.active)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Get any product by id
    pub async fn get(&self, product_id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    // ------------------------------------------------------------------
    // Supplier-owned products
    // ------------------------------------------------------------------

    /// List a supplier's own products
    pub async fn list_for_supplier(&self, supplier_id: Uuid) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE supplier_id = $1 ORDER BY name, id"
        ))
        .bind(supplier_id)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Get one of a supplier's own products
    pub async fn get_for_supplier(&self, supplier_id: Uuid, product_id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND supplier_id = $2"
        ))
        .bind(product_id)
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Create a product for a supplier
    pub async fn create(&self, supplier_id: Uuid, input: NewProduct) -> AppResult<Product> {
        let draft = ProductDraft::from(input);
        draft.validate()?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (supplier_id, name, description, unit_price, stock, active_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(supplier_id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.unit_price)
        .bind(draft.stock)
        .bind(draft.active_status)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(product_id = %product.id, %supplier_id, "product created");
        Ok(product)
    }

    /// Edit one of a supplier's products under a row lock; the edited product is revalidated
    pub async fn update(
        &self,
        supplier_id: Uuid,
        product_id: Uuid,
        patch: ProductPatch,
    ) -> AppResult<Product> {
        let mut tx = self.db.begin().await?;

        // Lock the row so an intake cannot land between the read and the write
        let existing = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND supplier_id = $2 FOR UPDATE"
        ))
        .bind(product_id)
        .bind(supplier_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let draft = existing.draft().apply(patch);
        draft.validate()?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $1, description = $2, unit_price = $3, stock = $4, active_status = $5
            WHERE id = $6 AND supplier_id = $7
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.unit_price)
        .bind(draft.stock)
        .bind(draft.active_status)
        .bind(product_id)
        .bind(supplier_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Delete one of a supplier's products (its inventory row cascades)
    pub async fn delete(&self, supplier_id: Uuid, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND supplier_id = $2")
            .bind(product_id)
            .bind(supplier_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        tracing::info!(%product_id, %supplier_id, "product deleted");
        Ok(())
    }
}
