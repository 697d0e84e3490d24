//! Medication supplier directory service
//!
//! Suppliers are a weak reference from medications: deleting one leaves the
//! medications in place with the link cleared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};

/// Supplier service for the supplier directory
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Medication supplier record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MedicationSupplier {
    pub id: i64,
    pub name: String,
    pub contact_info: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub contact_info: Option<String>,
    pub address: Option<String>,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub contact_info: Option<String>,
    pub address: Option<String>,
}

fn validate_supplier_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name".to_string(),
            message: "Supplier name cannot be empty".to_string(),
        });
    }
    if name.len() > 200 {
        return Err(AppError::Validation {
            field: "name".to_string(),
            message: "Supplier name is too long".to_string(),
        });
    }
    Ok(())
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a new supplier
    pub async fn create_supplier(
        &self,
        input: CreateSupplierInput,
    ) -> AppResult<MedicationSupplier> {
        validate_supplier_name(&input.name)?;

        let supplier = sqlx::query_as::<_, MedicationSupplier>(
            r#"
            INSERT INTO medication_suppliers (name, contact_info, address)
            VALUES ($1, $2, $3)
            RETURNING id, name, contact_info, address, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_info)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Get a supplier by id
    pub async fn get_supplier(&self, supplier_id: i64) -> AppResult<MedicationSupplier> {
        let supplier = sqlx::query_as::<_, MedicationSupplier>(
            "SELECT id, name, contact_info, address, created_at FROM medication_suppliers WHERE id = $1",
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(supplier)
    }

    /// List all suppliers
    pub async fn list_suppliers(&self) -> AppResult<Vec<MedicationSupplier>> {
        let suppliers = sqlx::query_as::<_, MedicationSupplier>(
            "SELECT id, name, contact_info, address, created_at FROM medication_suppliers ORDER BY name, id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// Update a supplier
    pub async fn update_supplier(
        &self,
        supplier_id: i64,
        input: UpdateSupplierInput,
    ) -> AppResult<MedicationSupplier> {
        let existing = self.get_supplier(supplier_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let contact_info = input.contact_info.or(existing.contact_info);
        let address = input.address.or(existing.address);

        validate_supplier_name(&name)?;

        let supplier = sqlx::query_as::<_, MedicationSupplier>(
            r#"
            UPDATE medication_suppliers
            SET name = $1, contact_info = $2, address = $3
            WHERE id = $4
            RETURNING id, name, contact_info, address, created_at
            "#,
        )
        .bind(&name)
        .bind(&contact_info)
        .bind(&address)
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Delete a supplier; medications that reference it keep their records
    /// with the supplier link cleared
    pub async fn delete_supplier(&self, supplier_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM medication_suppliers WHERE id = $1")
            .bind(supplier_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }
}
