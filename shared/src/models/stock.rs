//! Stock adjustment calculation

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// How an adjustment changes the current quantity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// Increase by the adjustment quantity
    Add,
    /// Decrease by the adjustment quantity, guarded against over-removal
    Remove,
    /// Assign the adjustment quantity as the new absolute value
    Set,
}

impl AdjustmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentType::Add => "add",
            AdjustmentType::Remove => "remove",
            AdjustmentType::Set => "set",
        }
    }
}

impl std::fmt::Display for AdjustmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse failure for string-typed adjustment inputs (query params, log filters)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown adjustment type '{0}' (expected add, remove or set)")]
pub struct ParseAdjustmentTypeError(pub String);

impl FromStr for AdjustmentType {
    type Err = ParseAdjustmentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(AdjustmentType::Add),
            "remove" => Ok(AdjustmentType::Remove),
            "set" => Ok(AdjustmentType::Set),
            other => Err(ParseAdjustmentTypeError(other.to_string())),
        }
    }
}

/// Rejection reasons for a candidate adjustment, before any storage is touched
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdjustmentError {
    #[error("adjustment quantity must be zero or positive (got {0})")]
    NegativeQuantity(i32),
    #[error("adjustment would overflow the storable quantity range")]
    QuantityOverflow,
    #[error("cannot remove more than current stock ({available} available)")]
    InsufficientStock { available: i32, requested: i32 },
}

/// Compute the candidate new quantity for an adjustment.
///
/// This is the authoritative calculation: over-removal is rejected, never
/// clamped. `set` assigns the quantity directly, including to zero.
pub fn compute_adjustment(
    current_quantity: i32,
    adjustment_type: AdjustmentType,
    adjustment_quantity: i32,
) -> Result<i32, AdjustmentError> {
    if adjustment_quantity < 0 {
        return Err(AdjustmentError::NegativeQuantity(adjustment_quantity));
    }

    match adjustment_type {
        AdjustmentType::Add => current_quantity
            .checked_add(adjustment_quantity)
            .ok_or(AdjustmentError::QuantityOverflow),
        AdjustmentType::Remove => {
            if adjustment_quantity > current_quantity {
                Err(AdjustmentError::InsufficientStock {
                    available: current_quantity,
                    requested: adjustment_quantity,
                })
            } else {
                Ok(current_quantity - adjustment_quantity)
            }
        }
        AdjustmentType::Set => Ok(adjustment_quantity),
    }
}

/// Clamped what-if projection used by form previews.
///
/// Never fails and never persists anything; a remove below zero shows as
/// zero. The persistence path always goes through [`compute_adjustment`].
pub fn preview_adjustment(
    current_quantity: i32,
    adjustment_type: AdjustmentType,
    adjustment_quantity: i32,
) -> i32 {
    let quantity = adjustment_quantity.max(0);
    match adjustment_type {
        AdjustmentType::Add => current_quantity.saturating_add(quantity),
        AdjustmentType::Remove => (current_quantity - quantity).max(0),
        AdjustmentType::Set => quantity,
    }
}
