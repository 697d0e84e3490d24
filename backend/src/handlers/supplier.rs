//! HTTP handlers for supplier directory endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::middleware::{require_role, CurrentUser};
use crate::services::supplier::{
    CreateSupplierInput, MedicationSupplier, SupplierService, UpdateSupplierInput,
};
use crate::AppState;

/// List all suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MedicationSupplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers))
}

/// Create a new supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<Json<MedicationSupplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.create_supplier(input).await?;
    Ok(Json(supplier))
}

/// Get a supplier by id
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> AppResult<Json<MedicationSupplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get_supplier(supplier_id).await?;
    Ok(Json(supplier))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<MedicationSupplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.update_supplier(supplier_id, input).await?;
    Ok(Json(supplier))
}

/// Delete a supplier (admin only)
pub async fn delete_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<i64>,
) -> AppResult<Json<()>> {
    require_role(&current_user.0, "admin")?;

    let service = SupplierService::new(state.db);
    service.delete_supplier(supplier_id).await?;
    Ok(Json(()))
}
