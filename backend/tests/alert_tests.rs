//! Tests for stock and expiry alert aggregation
//!
//! Covers:
//! - Alert completeness: every problem state surfaces exactly one alert
//! - Stock and expiry as independent alert dimensions
//! - Expired stock handling (not a dashboard alert)
//! - Deterministic ordering of the scan output

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared::{scan_alerts, AlertType, StockSnapshot};

/// Helper to build a date
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Helper to build a snapshot row
fn snapshot(
    medication_id: i64,
    name: &str,
    quantity: i32,
    min_stock_level: i32,
    expiry_date: Option<NaiveDate>,
) -> StockSnapshot {
    StockSnapshot {
        medication_id,
        name: name.to_string(),
        quantity,
        min_stock_level,
        expiry_date,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

mod alert_content {
    use super::*;

    #[test]
    fn healthy_medication_raises_nothing() {
        let meds = vec![snapshot(1, "Paracetamol 500mg", 120, 10, Some(date(2025, 6, 1)))];
        assert!(scan_alerts(&meds, date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn low_stock_message_names_quantity_and_threshold() {
        let meds = vec![snapshot(1, "Amoxicillin 500mg", 3, 10, None)];
        let alerts = scan_alerts(&meds, date(2024, 1, 1));

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::LowStock);
        assert_eq!(
            alerts[0].message,
            "Amoxicillin 500mg: 3 in stock (minimum stock level 10)"
        );
        assert_eq!(alerts[0].days_until_expiry, None);
    }

    #[test]
    fn depleted_medication_raises_exactly_one_out_of_stock_alert() {
        let meds = vec![snapshot(7, "Insulin Glargine", 0, 10, None)];
        let alerts = scan_alerts(&meds, date(2024, 1, 1));

        // Out of stock, not additionally low stock
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::OutOfStock);
        assert_eq!(alerts[0].message, "Insulin Glargine: stock depleted");
    }

    #[test]
    fn expiring_soon_alert_carries_days_until_expiry() {
        let as_of = date(2024, 1, 1);
        let meds = vec![snapshot(2, "Cough Syrup", 50, 10, Some(date(2024, 1, 11)))];
        let alerts = scan_alerts(&meds, as_of);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::ExpiringSoon);
        assert_eq!(alerts[0].days_until_expiry, Some(10));
        assert_eq!(alerts[0].message, "Cough Syrup: expires in 10 days");
    }

    #[test]
    fn expiring_today_message_says_today() {
        let as_of = date(2024, 1, 1);
        let meds = vec![snapshot(2, "Cough Syrup", 50, 10, Some(as_of))];
        let alerts = scan_alerts(&meds, as_of);

        assert_eq!(alerts[0].days_until_expiry, Some(0));
        assert_eq!(alerts[0].message, "Cough Syrup: expires today");
    }

    #[test]
    fn one_day_left_message_is_singular() {
        let as_of = date(2024, 1, 1);
        let meds = vec![snapshot(2, "Cough Syrup", 50, 10, Some(date(2024, 1, 2)))];
        let alerts = scan_alerts(&meds, as_of);

        assert_eq!(alerts[0].message, "Cough Syrup: expires in 1 day");
    }

    #[test]
    fn thirtieth_day_still_raises_the_expiry_alert() {
        let as_of = date(2024, 1, 1);
        let meds = vec![snapshot(3, "Ibuprofen 400mg", 80, 10, Some(date(2024, 1, 31)))];
        let alerts = scan_alerts(&meds, as_of);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days_until_expiry, Some(30));
    }

    #[test]
    fn thirty_first_day_raises_nothing() {
        let as_of = date(2024, 1, 1);
        let meds = vec![snapshot(3, "Ibuprofen 400mg", 80, 10, Some(date(2024, 2, 1)))];
        assert!(scan_alerts(&meds, as_of).is_empty());
    }

    #[test]
    fn expired_medication_is_not_an_alert() {
        // Expired stock belongs to the disposal workflow, not the dashboard
        let as_of = date(2024, 6, 1);
        let meds = vec![snapshot(4, "Old Batch Aspirin", 200, 10, Some(date(2024, 5, 20)))];
        assert!(scan_alerts(&meds, as_of).is_empty());
    }

    #[test]
    fn expired_medication_still_raises_its_stock_alert() {
        let as_of = date(2024, 6, 1);
        let meds = vec![snapshot(4, "Old Batch Aspirin", 0, 10, Some(date(2024, 5, 20)))];
        let alerts = scan_alerts(&meds, as_of);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::OutOfStock);
    }

    #[test]
    fn stock_and_expiry_alert_independently() {
        let as_of = date(2024, 1, 1);
        let meds = vec![snapshot(5, "Amoxicillin 500mg", 2, 10, Some(date(2024, 1, 15)))];
        let alerts = scan_alerts(&meds, as_of);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].alert_type, AlertType::LowStock);
        assert_eq!(alerts[1].alert_type, AlertType::ExpiringSoon);
        assert_eq!(alerts[1].days_until_expiry, Some(14));
    }

    #[test]
    fn empty_snapshot_scans_to_empty() {
        assert!(scan_alerts(&[], date(2024, 1, 1)).is_empty());
    }
}

mod alert_ordering {
    use super::*;

    #[test]
    fn output_is_sorted_by_medication_then_type() {
        let as_of = date(2024, 1, 1);
        // Deliberately out of id order
        let meds = vec![
            snapshot(3, "Gamma", 0, 10, None),
            snapshot(1, "Alpha", 2, 10, Some(date(2024, 1, 10))),
            snapshot(2, "Beta", 0, 10, Some(date(2024, 1, 5))),
        ];
        let alerts = scan_alerts(&meds, as_of);

        let keys: Vec<(i64, AlertType)> = alerts
            .iter()
            .map(|a| (a.medication_id, a.alert_type))
            .collect();
        assert_eq!(
            keys,
            vec![
                (1, AlertType::LowStock),
                (1, AlertType::ExpiringSoon),
                (2, AlertType::OutOfStock),
                (2, AlertType::ExpiringSoon),
                (3, AlertType::OutOfStock),
            ]
        );
    }

    #[test]
    fn repeated_scans_are_identical() {
        let as_of = date(2024, 1, 1);
        let meds = vec![
            snapshot(2, "Beta", 0, 10, Some(date(2024, 1, 5))),
            snapshot(1, "Alpha", 2, 10, Some(date(2024, 1, 10))),
        ];
        assert_eq!(scan_alerts(&meds, as_of), scan_alerts(&meds, as_of));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    fn snapshot_strategy() -> impl Strategy<Value = StockSnapshot> {
        (
            1i64..=50,
            0i32..=100,
            0i32..=20,
            prop::option::of(-60i64..=60),
        )
            .prop_map(|(id, quantity, min_stock_level, expiry_offset)| StockSnapshot {
                medication_id: id,
                name: format!("Medication {}", id),
                quantity,
                min_stock_level,
                expiry_date: expiry_offset.map(|days| date(2024, 6, 1) + Duration::days(days)),
            })
    }

    fn inventory_strategy() -> impl Strategy<Value = Vec<StockSnapshot>> {
        prop::collection::vec(snapshot_strategy(), 0..20)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Each medication contributes at most one stock and one expiry alert
        #[test]
        fn prop_at_most_two_alerts_per_medication(meds in inventory_strategy()) {
            let as_of = date(2024, 6, 1);
            let alerts = scan_alerts(&meds, as_of);
            prop_assert!(alerts.len() <= meds.len() * 2);

            for med in &meds {
                let stock_alerts = alerts
                    .iter()
                    .filter(|a| {
                        a.medication_id == med.medication_id
                            && a.alert_type != AlertType::ExpiringSoon
                    })
                    .count();
                // Ids can repeat across generated snapshots
                let occurrences = meds
                    .iter()
                    .filter(|m| m.medication_id == med.medication_id)
                    .count();
                prop_assert!(stock_alerts <= occurrences);
            }
        }

        /// A depleted medication always surfaces, a stocked one never as depleted
        #[test]
        fn prop_out_of_stock_alerts_track_zero_quantities(meds in inventory_strategy()) {
            let as_of = date(2024, 6, 1);
            let alerts = scan_alerts(&meds, as_of);

            let depleted_inputs = meds.iter().filter(|m| m.quantity == 0).count();
            let depleted_alerts = alerts
                .iter()
                .filter(|a| a.alert_type == AlertType::OutOfStock)
                .count();
            prop_assert_eq!(depleted_inputs, depleted_alerts);
        }

        /// Expiry alerts only ever point to the future-or-today window
        #[test]
        fn prop_expiry_alerts_never_point_backwards(meds in inventory_strategy()) {
            let as_of = date(2024, 6, 1);
            for alert in scan_alerts(&meds, as_of) {
                if alert.alert_type == AlertType::ExpiringSoon {
                    let days = alert.days_until_expiry.unwrap();
                    prop_assert!((0..=30).contains(&days));
                }
            }
        }

        /// Scan output is always sorted by medication id then alert type
        #[test]
        fn prop_output_sorted(meds in inventory_strategy()) {
            let as_of = date(2024, 6, 1);
            let alerts = scan_alerts(&meds, as_of);
            for pair in alerts.windows(2) {
                let left = (pair[0].medication_id, pair[0].alert_type);
                let right = (pair[1].medication_id, pair[1].alert_type);
                prop_assert!(left <= right);
            }
        }

        /// Scanning is pure: same snapshot, same alerts
        #[test]
        fn prop_scan_is_deterministic(meds in inventory_strategy()) {
            let as_of = date(2024, 6, 1);
            prop_assert_eq!(scan_alerts(&meds, as_of), scan_alerts(&meds, as_of));
        }
    }
}
