//! Inventory service: stock intake from suppliers and the inventory report
//!
//! `intake` is the only write path into `inventory`. It locks the product and
//! its inventory row, asks `shared::intake::decide_intake` what to write, and
//! writes it in the same transaction, so concurrent intakes on one product are
//! serialized and either fully apply or leave nothing behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::intake::{
    decide_intake, IntakeDecision, IntakeRejection, InventoryChange, InventoryLevel, QuantityInput,
};
use shared::models::InventoryDraft;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::product::{Product, PRODUCT_COLUMNS};
use crate::services::supplier::non_blank;

/// Inventory service for intake and inventory reporting
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Inventory record (at most one per product)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub selling_unit_price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inventory row joined with its product and supplier, for listings and export
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryListing {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub supplier_name: String,
    pub selling_unit_price: Decimal,
    pub stock: i32,
    pub updated_at: DateTime<Utc>,
}

/// Filters for the inventory report; quantity bounds apply to the inventory stock
#[derive(Debug, Default, Deserialize)]
pub struct InventoryFilter {
    pub product_name: Option<String>,
    pub supplier_name: Option<String>,
    pub quantity_min: Option<i32>,
    pub quantity_max: Option<i32>,
    pub format: Option<String>, // "json" or "csv"
}

/// A fully applied intake
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReceipt {
    pub product: Product,
    pub inventory: InventoryRecord,
    pub inventory_created: bool,
}

/// Result of an intake request. Rejections are ordinary outcomes, not errors.
#[derive(Debug, Clone)]
pub enum IntakeOutcome {
    Applied(IntakeReceipt),
    Rejected(IntakeRejection),
}

impl InventoryRecord {
    fn level(&self) -> InventoryLevel {
        InventoryLevel {
            id: self.id,
            stock: self.stock,
        }
    }
}

const INVENTORY_COLUMNS: &str = r#"
    id, product_id, selling_unit_price, stock, created_at, updated_at
"#;

const LISTING_QUERY: &str = r#"
    SELECT i.id, i.product_id, p.name AS product_name, u.username AS supplier_name,
           i.selling_unit_price, i.stock, i.updated_at
    FROM inventory i
    JOIN products p ON p.id = i.product_id
    JOIN suppliers s ON s.id = p.supplier_id
    JOIN users u ON u.id = s.user_id
"#;

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Absorb `quantity` units of a product's supplier stock into inventory
    pub async fn intake(
        &self,
        product_id: Uuid,
        quantity: Option<&QuantityInput>,
    ) -> AppResult<IntakeOutcome> {
        // Unknown products are rejected before any transaction is opened
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
        )
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Ok(rejected(product_id, IntakeRejection::NotFound));
        }

        let mut tx = self.db.begin().await?;

        // Row locks, product first: a concurrent intake on this product waits
        // here and then decides against the committed decrement.
        let locked = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let existing = match locked {
            Some(_) => {
                sqlx::query_as::<_, InventoryRecord>(&format!(
                    "SELECT {INVENTORY_COLUMNS} FROM inventory WHERE product_id = $1 FOR UPDATE"
                ))
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };

        let decision = decide_intake(
            locked.as_ref().map(Product::stock_snapshot),
            quantity,
            existing.as_ref().map(InventoryRecord::level),
        );

        let (product, IntakeDecision { plan, change }) = match (locked, decision) {
            (Some(product), Ok(decision)) => (product, decision),
            (_, decision) => {
                tx.rollback().await?;
                let rejection = decision.err().unwrap_or(IntakeRejection::NotFound);
                return Ok(rejected(product_id, rejection));
            }
        };

        let mut draft = product.draft();
        draft.stock = plan.remaining_stock;
        draft.active_status = plan.active_status;
        draft.validate()?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET stock = $1, active_status = $2
            WHERE id = $3
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(draft.stock)
        .bind(draft.active_status)
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        let (inventory, inventory_created) = match change {
            InventoryChange::Create {
                stock,
                selling_unit_price,
            } => {
                InventoryDraft {
                    selling_unit_price,
                    stock,
                }
                .validate()?;

                let record = sqlx::query_as::<_, InventoryRecord>(&format!(
                    r#"
                    INSERT INTO inventory (product_id, selling_unit_price, stock)
                    VALUES ($1, $2, $3)
                    RETURNING {INVENTORY_COLUMNS}
                    "#
                ))
                .bind(product_id)
                .bind(selling_unit_price)
                .bind(stock)
                .fetch_one(&mut *tx)
                .await?;

                (record, true)
            }
            InventoryChange::Increment {
                inventory_id,
                stock,
            } => {
                let selling_unit_price = existing
                    .as_ref()
                    .map(|record| record.selling_unit_price)
                    .ok_or_else(|| {
                        AppError::Internal("inventory row vanished under lock".to_string())
                    })?;
                InventoryDraft {
                    selling_unit_price,
                    stock,
                }
                .validate()?;

                let record = sqlx::query_as::<_, InventoryRecord>(&format!(
                    r#"
                    UPDATE inventory
                    SET stock = $1
                    WHERE id = $2
                    RETURNING {INVENTORY_COLUMNS}
                    "#
                ))
                .bind(stock)
                .bind(inventory_id)
                .fetch_one(&mut *tx)
                .await?;

                (record, false)
            }
        };

        tx.commit().await?;

        tracing::info!(
            %product_id,
            quantity = plan.quantity,
            remaining_stock = product.stock,
            deactivated = plan.deactivates(),
            inventory_id = %inventory.id,
            inventory_stock = inventory.stock,
            inventory_created,
            "stock intake applied"
        );

        Ok(IntakeOutcome::Applied(IntakeReceipt {
            product,
            inventory,
            inventory_created,
        }))
    }

    /// Inventory report, filtered by product name, supplier name and stock bounds
    pub async fn list(&self, filter: &InventoryFilter) -> AppResult<Vec<InventoryListing>> {
        let rows = sqlx::query_as::<_, InventoryListing>(&format!(
            r#"
            {LISTING_QUERY}
            WHERE ($1::text IS NULL OR p.name ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR u.username ILIKE '%' || $2 || '%')
              AND ($3::integer IS NULL OR i.stock >= $3)
              AND ($4::integer IS NULL OR i.stock <= $4)
            ORDER BY p.name, i.id
            "#
        ))
        .bind(non_blank(&filter.product_name))
        .bind(non_blank(&filter.supplier_name))
        .bind(filter.quantity_min)
        .bind(filter.quantity_max)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Get one inventory row
    pub async fn get(&self, inventory_id: Uuid) -> AppResult<InventoryListing> {
        sqlx::query_as::<_, InventoryListing>(&format!("{LISTING_QUERY} WHERE i.id = $1"))
            .bind(inventory_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory".to_string()))
    }
}

fn rejected(product_id: Uuid, rejection: IntakeRejection) -> IntakeOutcome {
    tracing::warn!(%product_id, reason = rejection.code(), "stock intake rejected: {}", rejection);
    IntakeOutcome::Rejected(rejection)
}
