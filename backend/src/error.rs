//! Error handling for the Clinic Administration Platform
//!
//! Provides consistent JSON error responses across all endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::{AdjustmentError, ParseAdjustmentTypeError};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Stock control errors
    #[error("Invalid adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("Invalid adjustment type: {0}")]
    InvalidAdjustmentType(String),

    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<AdjustmentError> for AppError {
    fn from(err: AdjustmentError) -> Self {
        match err {
            AdjustmentError::InsufficientStock {
                available,
                requested,
            } => AppError::InsufficientStock {
                available,
                requested,
            },
            other => AppError::InvalidAdjustment(other.to_string()),
        }
    }
}

impl From<ParseAdjustmentTypeError> for AppError {
    fn from(err: ParseAdjustmentTypeError) -> Self {
        AppError::InvalidAdjustmentType(err.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message: message.clone(),
                    field: None,
                },
            ),
            AppError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                ErrorDetail {
                    code: "INSUFFICIENT_PERMISSIONS".to_string(),
                    message: "You do not have permission to perform this action".to_string(),
                    field: None,
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message: format!("A record with this {} already exists", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::InvalidAdjustment(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_ADJUSTMENT".to_string(),
                    message: msg.clone(),
                    field: Some("adjustment_quantity".to_string()),
                },
            ),
            AppError::InvalidAdjustmentType(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_ADJUSTMENT_TYPE".to_string(),
                    message: msg.clone(),
                    field: Some("adjustment_type".to_string()),
                },
            ),
            AppError::InsufficientStock { available, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message: format!(
                        "cannot remove more than current stock ({} available)",
                        available
                    ),
                    field: None,
                },
            ),
            AppError::ConcurrentModification(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CONCURRENT_MODIFICATION".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
