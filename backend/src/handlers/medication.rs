//! HTTP handlers for medication registry endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::{require_role, CurrentUser};
use crate::services::medication::{
    CreateMedicationInput, Medication, MedicationService, MedicationStatus, MedicationWithStatus,
    UpdateMedicationInput,
};
use crate::AppState;
use shared::types::{PaginatedResponse, Pagination};

/// Query parameters for listing medications
#[derive(Debug, Deserialize)]
pub struct ListMedicationsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub include_inactive: Option<bool>,
    pub as_of: Option<NaiveDate>,
}

/// List medications with derived stock and expiry status
pub async fn list_medications(
    State(state): State<AppState>,
    Query(query): Query<ListMedicationsQuery>,
) -> AppResult<Json<PaginatedResponse<MedicationWithStatus>>> {
    let service = MedicationService::new(state.db);
    let pagination = Pagination::new(query.page.unwrap_or(1), query.per_page.unwrap_or(20));
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let medications = service
        .list_medications(
            &pagination,
            query.include_inactive.unwrap_or(false),
            query.search.as_deref(),
            as_of,
        )
        .await?;
    Ok(Json(medications))
}

/// Register a new medication
pub async fn create_medication(
    State(state): State<AppState>,
    Json(input): Json<CreateMedicationInput>,
) -> AppResult<Json<Medication>> {
    let service = MedicationService::new(state.db);
    let medication = service.create_medication(input).await?;
    Ok(Json(medication))
}

/// Get a medication by id
pub async fn get_medication(
    State(state): State<AppState>,
    Path(medication_id): Path<i64>,
) -> AppResult<Json<Medication>> {
    let service = MedicationService::new(state.db);
    let medication = service.get_medication(medication_id).await?;
    Ok(Json(medication))
}

/// Update medication metadata
pub async fn update_medication(
    State(state): State<AppState>,
    Path(medication_id): Path<i64>,
    Json(input): Json<UpdateMedicationInput>,
) -> AppResult<Json<Medication>> {
    let service = MedicationService::new(state.db);
    let medication = service.update_medication(medication_id, input).await?;
    Ok(Json(medication))
}

/// Deactivate a medication (admin only)
pub async fn deactivate_medication(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(medication_id): Path<i64>,
) -> AppResult<Json<()>> {
    require_role(&current_user.0, "admin")?;

    let service = MedicationService::new(state.db);
    service.deactivate_medication(medication_id).await?;
    Ok(Json(()))
}

/// Query parameters for the status endpoint
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub as_of: Option<NaiveDate>,
}

/// Get stock and expiry status for a medication
pub async fn get_medication_status(
    State(state): State<AppState>,
    Path(medication_id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<MedicationStatus>> {
    let service = MedicationService::new(state.db);
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let status = service.get_status(medication_id, as_of).await?;
    Ok(Json(status))
}
