//! HTTP handlers for stock alert endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::StockAlert;
use crate::services::AlertService;
use crate::AppState;

/// Query parameters for the alert scan
#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    pub as_of: Option<NaiveDate>,
}

/// Scan active medications for stock and expiry alerts
pub async fn get_stock_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> AppResult<Json<Vec<StockAlert>>> {
    let service = AlertService::new(state.db);
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let alerts = service.scan(as_of).await?;
    Ok(Json(alerts))
}
