//! Medication stock and expiry classification

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum stock threshold applied at registration when none is supplied
pub const DEFAULT_MIN_STOCK_LEVEL: i32 = 10;

/// Days before expiry (inclusive) at which a medication counts as expiring soon
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 30;

/// Stock level classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// quantity == 0
    OutOfStock,
    /// 0 < quantity <= min_stock_level
    LowStock,
    /// quantity > min_stock_level
    InStock,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::OutOfStock => write!(f, "Out of Stock"),
            StockStatus::LowStock => write!(f, "Low Stock"),
            StockStatus::InStock => write!(f, "In Stock"),
        }
    }
}

/// Expiry classification relative to an as-of date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Expiry date is in the past
    Expired,
    /// Expires within the next 30 days (today inclusive)
    ExpiringSoon,
    /// More than 30 days of shelf life left
    Valid,
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryStatus::Expired => write!(f, "Expired"),
            ExpiryStatus::ExpiringSoon => write!(f, "Expiring Soon"),
            ExpiryStatus::Valid => write!(f, "Valid"),
        }
    }
}

/// Classify current quantity against the minimum stock threshold.
///
/// Zero quantity wins over the threshold comparison: a medication with
/// `min_stock_level == 0` and nothing on the shelf is still out of stock.
pub fn classify_stock(quantity: i32, min_stock_level: i32) -> StockStatus {
    if quantity == 0 {
        StockStatus::OutOfStock
    } else if quantity <= min_stock_level {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// Whole days between the as-of date and the expiry date (negative once past)
pub fn days_until_expiry(expiry_date: NaiveDate, as_of: NaiveDate) -> i64 {
    (expiry_date - as_of).num_days()
}

/// Classify an optional expiry date against an as-of date.
///
/// Medications without an expiry date carry no expiry tracking and yield
/// `None`. Day 30 is still expiring soon; day 31 is valid; expiring today
/// (day 0) is expiring soon, not expired.
pub fn classify_expiry(expiry_date: Option<NaiveDate>, as_of: NaiveDate) -> Option<ExpiryStatus> {
    let expiry = expiry_date?;
    let days = days_until_expiry(expiry, as_of);
    let status = if days < 0 {
        ExpiryStatus::Expired
    } else if days <= EXPIRING_SOON_WINDOW_DAYS {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Valid
    };
    Some(status)
}
