//! HTTP handlers for stock adjustment and audit log endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::stock::{
    AdjustmentOutcome, AdjustmentPreview, ApplyAdjustmentInput, StockLogEntry, StockService,
};
use crate::AppState;
use shared::types::{PaginatedResponse, Pagination};

/// Apply a stock adjustment to a medication
pub async fn apply_adjustment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(medication_id): Path<i64>,
    Json(input): Json<ApplyAdjustmentInput>,
) -> AppResult<Json<AdjustmentOutcome>> {
    let service = StockService::new(state.db);
    let outcome = service
        .apply_adjustment(medication_id, current_user.0.user_id, &input)
        .await?;
    Ok(Json(outcome))
}

/// Query parameters for the adjustment preview
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub adjustment_type: String,
    pub quantity: i32,
}

/// Preview an adjustment without applying it
pub async fn preview_adjustment(
    State(state): State<AppState>,
    Path(medication_id): Path<i64>,
    Query(query): Query<PreviewQuery>,
) -> AppResult<Json<AdjustmentPreview>> {
    let service = StockService::new(state.db);
    let preview = service
        .preview(medication_id, &query.adjustment_type, query.quantity)
        .await?;
    Ok(Json(preview))
}

/// Query parameters for stock log listings
#[derive(Debug, Deserialize)]
pub struct StockLogQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub change_type: Option<String>,
}

/// Get the adjustment history for a medication
pub async fn get_medication_stock_log(
    State(state): State<AppState>,
    Path(medication_id): Path<i64>,
    Query(query): Query<StockLogQuery>,
) -> AppResult<Json<PaginatedResponse<StockLogEntry>>> {
    let service = StockService::new(state.db);
    let pagination = Pagination::new(query.page.unwrap_or(1), query.per_page.unwrap_or(20));
    let entries = service
        .get_medication_log(medication_id, &pagination)
        .await?;
    Ok(Json(entries))
}

/// List the adjustment history across all medications
pub async fn list_stock_log(
    State(state): State<AppState>,
    Query(query): Query<StockLogQuery>,
) -> AppResult<Json<PaginatedResponse<StockLogEntry>>> {
    let service = StockService::new(state.db);
    let pagination = Pagination::new(query.page.unwrap_or(1), query.per_page.unwrap_or(20));
    let entries = service
        .list_log(&pagination, query.change_type.as_deref())
        .await?;
    Ok(Json(entries))
}
