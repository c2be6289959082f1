//! Reporting service for the admin dashboard and data export

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Dashboard metrics
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DashboardMetrics {
    pub supplier_count: i64,
    pub product_count: i64,
    pub active_product_count: i64,
    pub supplier_stock_units: i64,
    pub inventory_count: i64,
    pub inventory_stock_units: i64,
    pub inventory_value: Decimal,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Platform-wide counts for the admin dashboard
    pub async fn get_dashboard_metrics(&self) -> AppResult<DashboardMetrics> {
        let metrics = sqlx::query_as::<_, DashboardMetrics>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM suppliers) AS supplier_count,
                (SELECT COUNT(*) FROM products) AS product_count,
                (SELECT COUNT(*) FROM products WHERE active_status) AS active_product_count,
                (SELECT COALESCE(SUM(stock), 0)::bigint FROM products) AS supplier_stock_units,
                (SELECT COUNT(*) FROM inventory) AS inventory_count,
                (SELECT COALESCE(SUM(stock), 0)::bigint FROM inventory) AS inventory_stock_units,
                (SELECT COALESCE(SUM(selling_unit_price * stock), 0) FROM inventory) AS inventory_value
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(metrics)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
