//! Stock adjustment service
//!
//! The only write path for medication quantities. Every accepted adjustment
//! commits the new quantity and exactly one stock log entry in a single
//! transaction; the log is append-only and never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    classify_stock, compute_adjustment, preview_adjustment, AdjustmentType, StockStatus,
};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};

/// Stock service for adjustments and the audit log
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Append-only audit record of one accepted adjustment
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StockLogEntry {
    pub id: i64,
    pub medication_id: i64,
    pub change_type: String,
    /// Signed delta, new quantity minus previous quantity
    pub quantity_changed: i32,
    pub reason: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Input for applying a stock adjustment
#[derive(Debug, Deserialize)]
pub struct ApplyAdjustmentInput {
    pub adjustment_type: AdjustmentType,
    pub adjustment_quantity: i32,
    pub reason: Option<String>,
}

/// Outcome of an accepted adjustment
#[derive(Debug, Serialize)]
pub struct AdjustmentOutcome {
    pub medication_id: i64,
    pub change_type: AdjustmentType,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub quantity_changed: i32,
    pub stock_status: StockStatus,
    pub log_entry_id: i64,
}

/// Non-binding projection of an adjustment for the entry form
#[derive(Debug, Serialize)]
pub struct AdjustmentPreview {
    pub medication_id: i64,
    pub adjustment_type: AdjustmentType,
    pub adjustment_quantity: i32,
    pub current_quantity: i32,
    /// Clamped to zero; display only, the apply path rejects instead
    pub projected_quantity: i32,
    pub would_apply: bool,
}

#[derive(Debug, FromRow)]
struct QuantityRow {
    quantity: i32,
    min_stock_level: i32,
}

const LOG_COLUMNS: &str =
    "id, medication_id, change_type, quantity_changed, reason, created_by, created_at";

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply an adjustment, retrying once when the optimistic write loses a race
    pub async fn apply_adjustment(
        &self,
        medication_id: i64,
        user_id: Uuid,
        input: &ApplyAdjustmentInput,
    ) -> AppResult<AdjustmentOutcome> {
        match self.try_apply(medication_id, user_id, input).await {
            Err(AppError::ConcurrentModification(_)) => {
                tracing::debug!(medication_id, "adjustment lost an update race, retrying");
                self.try_apply(medication_id, user_id, input).await
            }
            outcome => outcome,
        }
    }

    /// One optimistic attempt: read, compute, conditionally write.
    ///
    /// The UPDATE carries the quantity the calculation was anchored to, so a
    /// concurrent adjustment that slipped in between read and write makes the
    /// row predicate miss and the whole attempt is rolled back.
    async fn try_apply(
        &self,
        medication_id: i64,
        user_id: Uuid,
        input: &ApplyAdjustmentInput,
    ) -> AppResult<AdjustmentOutcome> {
        let current = sqlx::query_as::<_, QuantityRow>(
            "SELECT quantity, min_stock_level FROM medications WHERE id = $1 AND is_active = true",
        )
        .bind(medication_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Medication".to_string()))?;

        let new_quantity = compute_adjustment(
            current.quantity,
            input.adjustment_type,
            input.adjustment_quantity,
        )?;
        let quantity_changed = new_quantity - current.quantity;

        let mut tx = self.db.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE medications
            SET quantity = $1, updated_at = NOW()
            WHERE id = $2 AND is_active = true AND quantity = $3
            "#,
        )
        .bind(new_quantity)
        .bind(medication_id)
        .bind(current.quantity)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Distinguish a lost race from a row that was deactivated meanwhile
            let still_active = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM medications WHERE id = $1 AND is_active = true)",
            )
            .bind(medication_id)
            .fetch_one(&mut *tx)
            .await?;

            return if still_active {
                Err(AppError::ConcurrentModification(format!(
                    "stock level for medication {} changed while the adjustment was in flight",
                    medication_id
                )))
            } else {
                Err(AppError::NotFound("Medication".to_string()))
            };
        }

        let entry = sqlx::query_as::<_, StockLogEntry>(&format!(
            r#"
            INSERT INTO stock_log (medication_id, change_type, quantity_changed, reason, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(medication_id)
        .bind(input.adjustment_type.as_str())
        .bind(quantity_changed)
        .bind(&input.reason)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AdjustmentOutcome {
            medication_id,
            change_type: input.adjustment_type,
            previous_quantity: current.quantity,
            new_quantity,
            quantity_changed,
            stock_status: classify_stock(new_quantity, current.min_stock_level),
            log_entry_id: entry.id,
        })
    }

    /// Project an adjustment without persisting anything
    pub async fn preview(
        &self,
        medication_id: i64,
        adjustment_type: &str,
        adjustment_quantity: i32,
    ) -> AppResult<AdjustmentPreview> {
        let adjustment_type = adjustment_type.parse::<AdjustmentType>()?;

        let current = sqlx::query_as::<_, QuantityRow>(
            "SELECT quantity, min_stock_level FROM medications WHERE id = $1 AND is_active = true",
        )
        .bind(medication_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Medication".to_string()))?;

        let projected_quantity =
            preview_adjustment(current.quantity, adjustment_type, adjustment_quantity);
        let would_apply =
            compute_adjustment(current.quantity, adjustment_type, adjustment_quantity).is_ok();

        Ok(AdjustmentPreview {
            medication_id,
            adjustment_type,
            adjustment_quantity,
            current_quantity: current.quantity,
            projected_quantity,
            would_apply,
        })
    }

    /// Adjustment history for one medication, newest first.
    ///
    /// History stays readable after the medication is deactivated.
    pub async fn get_medication_log(
        &self,
        medication_id: i64,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<StockLogEntry>> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM medications WHERE id = $1)")
                .bind(medication_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Medication".to_string()));
        }

        let total_items =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stock_log WHERE medication_id = $1")
                .bind(medication_id)
                .fetch_one(&self.db)
                .await?;

        let entries = sqlx::query_as::<_, StockLogEntry>(&format!(
            r#"
            SELECT {LOG_COLUMNS}
            FROM stock_log
            WHERE medication_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(medication_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: entries,
            pagination: PaginationMeta::new(pagination, total_items as u64),
        })
    }

    /// Adjustment history across all medications, newest first
    pub async fn list_log(
        &self,
        pagination: &Pagination,
        change_type: Option<&str>,
    ) -> AppResult<PaginatedResponse<StockLogEntry>> {
        let change_type = match change_type {
            Some(raw) => Some(raw.parse::<AdjustmentType>()?),
            None => None,
        };
        let filter = change_type.map(|t| t.as_str());

        let total_items = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stock_log WHERE ($1::TEXT IS NULL OR change_type = $1)",
        )
        .bind(filter)
        .fetch_one(&self.db)
        .await?;

        let entries = sqlx::query_as::<_, StockLogEntry>(&format!(
            r#"
            SELECT {LOG_COLUMNS}
            FROM stock_log
            WHERE ($1::TEXT IS NULL OR change_type = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(filter)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: entries,
            pagination: PaginationMeta::new(pagination, total_items as u64),
        })
    }
}
