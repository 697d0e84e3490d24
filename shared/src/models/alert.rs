//! Stock and expiry alert aggregation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::medication::{
    classify_expiry, classify_stock, days_until_expiry, ExpiryStatus, StockStatus,
};

/// Alert categories surfaced on the dashboard.
///
/// Declaration order doubles as sort order within a medication: stock
/// problems first, expiry warnings after.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    OutOfStock,
    LowStock,
    ExpiringSoon,
}

/// Minimal projection of a medication consumed by the alert scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub medication_id: i64,
    pub name: String,
    pub quantity: i32,
    pub min_stock_level: i32,
    pub expiry_date: Option<NaiveDate>,
}

/// One dashboard alert; recomputed on every scan, never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockAlert {
    pub medication_id: i64,
    pub name: String,
    pub alert_type: AlertType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i64>,
}

/// Scan a snapshot of active medications and build the combined alert list.
///
/// Stock and expiry are independent dimensions: a medication contributes at
/// most one alert from each, so zero, one or two alerts total. Expired
/// medications are not surfaced here; only the expiring-soon window is.
/// Output is sorted by medication id then alert type, so repeated scans of
/// the same snapshot produce identical lists.
pub fn scan_alerts(medications: &[StockSnapshot], as_of: NaiveDate) -> Vec<StockAlert> {
    let mut alerts = Vec::new();

    for med in medications {
        match classify_stock(med.quantity, med.min_stock_level) {
            StockStatus::OutOfStock => alerts.push(StockAlert {
                medication_id: med.medication_id,
                name: med.name.clone(),
                alert_type: AlertType::OutOfStock,
                message: format!("{}: stock depleted", med.name),
                days_until_expiry: None,
            }),
            StockStatus::LowStock => alerts.push(StockAlert {
                medication_id: med.medication_id,
                name: med.name.clone(),
                alert_type: AlertType::LowStock,
                message: format!(
                    "{}: {} in stock (minimum stock level {})",
                    med.name, med.quantity, med.min_stock_level
                ),
                days_until_expiry: None,
            }),
            StockStatus::InStock => {}
        }

        if let Some(expiry) = med.expiry_date {
            if classify_expiry(Some(expiry), as_of) == Some(ExpiryStatus::ExpiringSoon) {
                let days = days_until_expiry(expiry, as_of);
                let message = match days {
                    0 => format!("{}: expires today", med.name),
                    1 => format!("{}: expires in 1 day", med.name),
                    n => format!("{}: expires in {} days", med.name, n),
                };
                alerts.push(StockAlert {
                    medication_id: med.medication_id,
                    name: med.name.clone(),
                    alert_type: AlertType::ExpiringSoon,
                    message,
                    days_until_expiry: Some(days),
                });
            }
        }
    }

    alerts.sort_by(|a, b| {
        (a.medication_id, a.alert_type).cmp(&(b.medication_id, b.alert_type))
    });

    alerts
}
