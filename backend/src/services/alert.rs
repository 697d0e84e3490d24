//! Alert scanning service
//!
//! Snapshots the active medications and hands them to the pure alert scan.
//! Read-only; alerts are derived on demand and never persisted.

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;
use crate::models::{scan_alerts, StockAlert, StockSnapshot};

/// Alert service for stock and expiry warnings
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct SnapshotRow {
    id: i64,
    name: String,
    quantity: i32,
    min_stock_level: i32,
    expiry_date: Option<NaiveDate>,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Scan all active medications for stock and expiry alerts as of a date
    pub async fn scan(&self, as_of: NaiveDate) -> AppResult<Vec<StockAlert>> {
        let rows = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT id, name, quantity, min_stock_level, expiry_date
            FROM medications
            WHERE is_active = true
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let snapshots: Vec<StockSnapshot> = rows
            .into_iter()
            .map(|row| StockSnapshot {
                medication_id: row.id,
                name: row.name,
                quantity: row.quantity,
                min_stock_level: row.min_stock_level,
                expiry_date: row.expiry_date,
            })
            .collect();

        Ok(scan_alerts(&snapshots, as_of))
    }
}
