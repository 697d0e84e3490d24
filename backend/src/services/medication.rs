//! Medication registry service
//!
//! Registration, metadata updates and soft deactivation, plus the derived
//! stock/expiry status reads used by list and detail views. Quantity is
//! never written here; every quantity change goes through the stock
//! adjustment service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::{
    classify_expiry, classify_stock, days_until_expiry, ExpiryStatus, StockStatus,
    DEFAULT_MIN_STOCK_LEVEL,
};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::{
    validate_batch_number, validate_dosage, validate_initial_quantity, validate_medication_form,
    validate_medication_name, validate_min_stock_level, validate_unit_price,
};

/// Medication service for registry and status reads
#[derive(Clone)]
pub struct MedicationService {
    db: PgPool,
}

/// Medication record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Medication {
    pub id: i64,
    pub name: String,
    pub generic_name: String,
    pub dosage: String,
    pub form: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: i32,
    pub min_stock_level: i32,
    pub unit_price: Decimal,
    pub is_active: bool,
    pub supplier_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a medication
#[derive(Debug, Deserialize)]
pub struct CreateMedicationInput {
    pub name: String,
    pub generic_name: String,
    pub dosage: String,
    pub form: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: Option<NaiveDate>,
    /// Starting quantity; registration is not an adjustment and writes no
    /// stock log entry
    pub quantity: Option<i32>,
    pub min_stock_level: Option<i32>,
    pub unit_price: Decimal,
    pub supplier_id: Option<i64>,
}

/// Input for updating medication metadata; quantity is deliberately absent
#[derive(Debug, Deserialize)]
pub struct UpdateMedicationInput {
    pub name: Option<String>,
    pub generic_name: Option<String>,
    pub dosage: Option<String>,
    pub form: Option<String>,
    pub manufacturer: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub min_stock_level: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub supplier_id: Option<i64>,
    pub is_active: Option<bool>,
}

/// Medication decorated with derived classifications for list views
#[derive(Debug, Serialize)]
pub struct MedicationWithStatus {
    #[serde(flatten)]
    pub medication: Medication,
    pub stock_status: StockStatus,
    pub expiry_status: Option<ExpiryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i64>,
}

impl MedicationWithStatus {
    pub fn new(medication: Medication, as_of: NaiveDate) -> Self {
        let stock_status = classify_stock(medication.quantity, medication.min_stock_level);
        let expiry_status = classify_expiry(medication.expiry_date, as_of);
        let days = medication.expiry_date.map(|d| days_until_expiry(d, as_of));
        Self {
            medication,
            stock_status,
            expiry_status,
            days_until_expiry: days,
        }
    }
}

/// Stock and expiry status for the detail view
#[derive(Debug, Serialize)]
pub struct MedicationStatus {
    pub medication_id: i64,
    pub name: String,
    pub quantity: i32,
    pub min_stock_level: i32,
    pub stock_status: StockStatus,
    pub expiry_date: Option<NaiveDate>,
    pub expiry_status: Option<ExpiryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i64>,
    pub as_of: NaiveDate,
}

/// Map a field validator result onto a validation error
fn check(field: &str, result: Result<(), &'static str>) -> AppResult<()> {
    result.map_err(|message| AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    })
}

const MEDICATION_COLUMNS: &str = "id, name, generic_name, dosage, form, manufacturer, \
                                  batch_number, expiry_date, quantity, min_stock_level, \
                                  unit_price, is_active, supplier_id, created_at, updated_at";

impl MedicationService {
    /// Create a new MedicationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a new medication
    pub async fn create_medication(&self, input: CreateMedicationInput) -> AppResult<Medication> {
        check("name", validate_medication_name(&input.name))?;
        check("generic_name", validate_medication_name(&input.generic_name))?;
        check("dosage", validate_dosage(&input.dosage))?;
        check("form", validate_medication_form(&input.form))?;
        check("batch_number", validate_batch_number(&input.batch_number))?;
        check("unit_price", validate_unit_price(input.unit_price))?;

        let quantity = input.quantity.unwrap_or(0);
        check("quantity", validate_initial_quantity(quantity))?;

        let min_stock_level = input.min_stock_level.unwrap_or(DEFAULT_MIN_STOCK_LEVEL);
        check("min_stock_level", validate_min_stock_level(min_stock_level))?;

        if let Some(supplier_id) = input.supplier_id {
            self.ensure_supplier_exists(supplier_id).await?;
        }

        // One registration per (name, batch) pair
        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM medications WHERE name = $1 AND batch_number = $2)",
        )
        .bind(&input.name)
        .bind(&input.batch_number)
        .fetch_one(&self.db)
        .await?;

        if duplicate {
            return Err(AppError::DuplicateEntry("batch_number".to_string()));
        }

        let medication = sqlx::query_as::<_, Medication>(&format!(
            r#"
            INSERT INTO medications (
                name, generic_name, dosage, form, manufacturer, batch_number,
                expiry_date, quantity, min_stock_level, unit_price, supplier_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {MEDICATION_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.generic_name)
        .bind(&input.dosage)
        .bind(input.form.to_lowercase())
        .bind(&input.manufacturer)
        .bind(&input.batch_number)
        .bind(input.expiry_date)
        .bind(quantity)
        .bind(min_stock_level)
        .bind(input.unit_price)
        .bind(input.supplier_id)
        .fetch_one(&self.db)
        .await?;

        Ok(medication)
    }

    /// Get a medication by id (active or deactivated)
    pub async fn get_medication(&self, medication_id: i64) -> AppResult<Medication> {
        let medication = sqlx::query_as::<_, Medication>(&format!(
            "SELECT {MEDICATION_COLUMNS} FROM medications WHERE id = $1"
        ))
        .bind(medication_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Medication".to_string()))?;

        Ok(medication)
    }

    /// List medications with derived status, paginated
    pub async fn list_medications(
        &self,
        pagination: &Pagination,
        include_inactive: bool,
        search: Option<&str>,
        as_of: NaiveDate,
    ) -> AppResult<PaginatedResponse<MedicationWithStatus>> {
        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM medications
            WHERE (is_active = true OR $1)
              AND ($2::TEXT IS NULL OR name ILIKE '%' || $2 || '%' OR generic_name ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(include_inactive)
        .bind(search)
        .fetch_one(&self.db)
        .await?;

        let medications = sqlx::query_as::<_, Medication>(&format!(
            r#"
            SELECT {MEDICATION_COLUMNS}
            FROM medications
            WHERE (is_active = true OR $1)
              AND ($2::TEXT IS NULL OR name ILIKE '%' || $2 || '%' OR generic_name ILIKE '%' || $2 || '%')
            ORDER BY name, id
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(include_inactive)
        .bind(search)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let data = medications
            .into_iter()
            .map(|m| MedicationWithStatus::new(m, as_of))
            .collect();

        Ok(PaginatedResponse {
            data,
            pagination: PaginationMeta::new(pagination, total_items as u64),
        })
    }

    /// Get stock and expiry status for an active medication.
    ///
    /// Derived on read; nothing here is persisted. Deactivated medications
    /// are reported as not found, matching the adjustment path.
    pub async fn get_status(
        &self,
        medication_id: i64,
        as_of: NaiveDate,
    ) -> AppResult<MedicationStatus> {
        let medication = sqlx::query_as::<_, Medication>(&format!(
            "SELECT {MEDICATION_COLUMNS} FROM medications WHERE id = $1 AND is_active = true"
        ))
        .bind(medication_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Medication".to_string()))?;

        Ok(MedicationStatus {
            medication_id: medication.id,
            name: medication.name,
            quantity: medication.quantity,
            min_stock_level: medication.min_stock_level,
            stock_status: classify_stock(medication.quantity, medication.min_stock_level),
            expiry_date: medication.expiry_date,
            expiry_status: classify_expiry(medication.expiry_date, as_of),
            days_until_expiry: medication.expiry_date.map(|d| days_until_expiry(d, as_of)),
            as_of,
        })
    }

    /// Update medication metadata (never the quantity)
    pub async fn update_medication(
        &self,
        medication_id: i64,
        input: UpdateMedicationInput,
    ) -> AppResult<Medication> {
        let existing = self.get_medication(medication_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let generic_name = input.generic_name.unwrap_or(existing.generic_name);
        let dosage = input.dosage.unwrap_or(existing.dosage);
        let form = input
            .form
            .map(|f| f.to_lowercase())
            .unwrap_or(existing.form);
        let manufacturer = input.manufacturer.unwrap_or(existing.manufacturer);
        let batch_number = input.batch_number.unwrap_or(existing.batch_number);
        let expiry_date = input.expiry_date.or(existing.expiry_date);
        let min_stock_level = input.min_stock_level.unwrap_or(existing.min_stock_level);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);
        let supplier_id = input.supplier_id.or(existing.supplier_id);
        let is_active = input.is_active.unwrap_or(existing.is_active);

        check("name", validate_medication_name(&name))?;
        check("generic_name", validate_medication_name(&generic_name))?;
        check("dosage", validate_dosage(&dosage))?;
        check("form", validate_medication_form(&form))?;
        check("batch_number", validate_batch_number(&batch_number))?;
        check("unit_price", validate_unit_price(unit_price))?;
        check("min_stock_level", validate_min_stock_level(min_stock_level))?;

        if let Some(supplier_id) = supplier_id {
            self.ensure_supplier_exists(supplier_id).await?;
        }

        let medication = sqlx::query_as::<_, Medication>(&format!(
            r#"
            UPDATE medications
            SET name = $1, generic_name = $2, dosage = $3, form = $4, manufacturer = $5,
                batch_number = $6, expiry_date = $7, min_stock_level = $8, unit_price = $9,
                supplier_id = $10, is_active = $11, updated_at = NOW()
            WHERE id = $12
            RETURNING {MEDICATION_COLUMNS}
            "#
        ))
        .bind(&name)
        .bind(&generic_name)
        .bind(&dosage)
        .bind(&form)
        .bind(&manufacturer)
        .bind(&batch_number)
        .bind(expiry_date)
        .bind(min_stock_level)
        .bind(unit_price)
        .bind(supplier_id)
        .bind(is_active)
        .bind(medication_id)
        .fetch_one(&self.db)
        .await?;

        Ok(medication)
    }

    /// Soft-deactivate a medication; records never leave the registry
    pub async fn deactivate_medication(&self, medication_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE medications SET is_active = false, updated_at = NOW() WHERE id = $1 AND is_active = true",
        )
        .bind(medication_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Medication".to_string()));
        }

        Ok(())
    }

    async fn ensure_supplier_exists(&self, supplier_id: i64) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM medication_suppliers WHERE id = $1)",
        )
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }
}
