//! Tests for medication stock and expiry classification
//!
//! Covers:
//! - Stock status boundaries around the minimum stock level
//! - Expiry status relative to an injectable as-of date
//! - Classification totality and monotonicity

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared::{
    classify_expiry, classify_stock, days_until_expiry, ExpiryStatus, StockStatus,
    DEFAULT_MIN_STOCK_LEVEL, EXPIRING_SOON_WINDOW_DAYS,
};

/// Helper to build a date
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ============================================================================
// Stock Status Classification
// ============================================================================

mod stock_classification {
    use super::*;

    #[test]
    fn zero_quantity_is_out_of_stock() {
        assert_eq!(classify_stock(0, 10), StockStatus::OutOfStock);
    }

    #[test]
    fn zero_quantity_wins_over_zero_threshold() {
        // A threshold of zero does not turn an empty shelf into "in stock"
        assert_eq!(classify_stock(0, 0), StockStatus::OutOfStock);
    }

    #[test]
    fn quantity_at_threshold_is_low_stock() {
        // Boundary is inclusive
        assert_eq!(classify_stock(10, 10), StockStatus::LowStock);
    }

    #[test]
    fn quantity_one_is_low_stock() {
        assert_eq!(classify_stock(1, 10), StockStatus::LowStock);
    }

    #[test]
    fn quantity_just_above_threshold_is_in_stock() {
        assert_eq!(classify_stock(11, 10), StockStatus::InStock);
    }

    #[test]
    fn any_positive_quantity_beats_zero_threshold() {
        assert_eq!(classify_stock(1, 0), StockStatus::InStock);
    }

    #[test]
    fn default_threshold_is_ten() {
        assert_eq!(DEFAULT_MIN_STOCK_LEVEL, 10);
        assert_eq!(classify_stock(10, DEFAULT_MIN_STOCK_LEVEL), StockStatus::LowStock);
        assert_eq!(classify_stock(11, DEFAULT_MIN_STOCK_LEVEL), StockStatus::InStock);
    }

    #[test]
    fn large_quantities_stay_in_stock() {
        assert_eq!(classify_stock(1_000_000, 10), StockStatus::InStock);
    }
}

// ============================================================================
// Expiry Status Classification
// ============================================================================

mod expiry_classification {
    use super::*;

    #[test]
    fn no_expiry_date_yields_no_status() {
        assert_eq!(classify_expiry(None, date(2024, 1, 1)), None);
    }

    #[test]
    fn past_date_is_expired() {
        let status = classify_expiry(Some(date(2023, 12, 31)), date(2024, 1, 1));
        assert_eq!(status, Some(ExpiryStatus::Expired));
    }

    #[test]
    fn expiring_today_is_expiring_soon_not_expired() {
        let status = classify_expiry(Some(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(status, Some(ExpiryStatus::ExpiringSoon));
    }

    #[test]
    fn thirtieth_day_is_still_expiring_soon() {
        // 2024-01-01 -> 2024-01-31 is exactly 30 days
        let status = classify_expiry(Some(date(2024, 1, 31)), date(2024, 1, 1));
        assert_eq!(status, Some(ExpiryStatus::ExpiringSoon));
    }

    #[test]
    fn thirty_first_day_is_valid() {
        let status = classify_expiry(Some(date(2024, 2, 1)), date(2024, 1, 1));
        assert_eq!(status, Some(ExpiryStatus::Valid));
    }

    #[test]
    fn window_constant_is_thirty_days() {
        assert_eq!(EXPIRING_SOON_WINDOW_DAYS, 30);
    }

    #[test]
    fn leap_day_counts_as_one_day() {
        assert_eq!(days_until_expiry(date(2024, 2, 29), date(2024, 2, 28)), 1);
        let status = classify_expiry(Some(date(2024, 2, 29)), date(2024, 2, 28));
        assert_eq!(status, Some(ExpiryStatus::ExpiringSoon));
    }

    #[test]
    fn days_until_expiry_goes_negative_after_expiry() {
        assert_eq!(days_until_expiry(date(2024, 1, 1), date(2024, 1, 11)), -10);
    }

    #[test]
    fn far_future_date_is_valid() {
        let status = classify_expiry(Some(date(2030, 6, 15)), date(2024, 1, 1));
        assert_eq!(status, Some(ExpiryStatus::Valid));
    }

    #[test]
    fn classification_moves_with_the_as_of_date() {
        // Same medication, three different days at the clinic
        let expiry = Some(date(2024, 3, 15));
        assert_eq!(classify_expiry(expiry, date(2024, 1, 1)), Some(ExpiryStatus::Valid));
        assert_eq!(classify_expiry(expiry, date(2024, 3, 1)), Some(ExpiryStatus::ExpiringSoon));
        assert_eq!(classify_expiry(expiry, date(2024, 3, 16)), Some(ExpiryStatus::Expired));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = i32> {
        0..=100_000i32
    }

    fn threshold_strategy() -> impl Strategy<Value = i32> {
        0..=1_000i32
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Out of stock exactly when the quantity is zero
        #[test]
        fn prop_out_of_stock_iff_zero(
            quantity in quantity_strategy(),
            threshold in threshold_strategy()
        ) {
            let status = classify_stock(quantity, threshold);
            prop_assert_eq!(status == StockStatus::OutOfStock, quantity == 0);
        }

        /// Every quantity lands in exactly one class, consistent with the bounds
        #[test]
        fn prop_classification_total_and_consistent(
            quantity in quantity_strategy(),
            threshold in threshold_strategy()
        ) {
            match classify_stock(quantity, threshold) {
                StockStatus::OutOfStock => prop_assert_eq!(quantity, 0),
                StockStatus::LowStock => {
                    prop_assert!(quantity > 0);
                    prop_assert!(quantity <= threshold);
                }
                StockStatus::InStock => prop_assert!(quantity > threshold),
            }
        }

        /// More stock never makes the status worse
        #[test]
        fn prop_status_monotonic_in_quantity(
            q1 in quantity_strategy(),
            q2 in quantity_strategy(),
            threshold in threshold_strategy()
        ) {
            let (lo, hi) = if q1 <= q2 { (q1, q2) } else { (q2, q1) };
            prop_assert!(classify_stock(lo, threshold) <= classify_stock(hi, threshold));
        }

        /// The three expiry classes partition the timeline around the window
        #[test]
        fn prop_expiry_window_partitions(offset_days in -1_000i64..=1_000i64) {
            let as_of = date(2024, 6, 1);
            let expiry = as_of + Duration::days(offset_days);
            let status = classify_expiry(Some(expiry), as_of);

            let expected = if offset_days < 0 {
                ExpiryStatus::Expired
            } else if offset_days <= EXPIRING_SOON_WINDOW_DAYS {
                ExpiryStatus::ExpiringSoon
            } else {
                ExpiryStatus::Valid
            };
            prop_assert_eq!(status, Some(expected));
        }

        /// Without an expiry date there is never an expiry status
        #[test]
        fn prop_missing_expiry_never_classified(offset_days in -1_000i64..=1_000i64) {
            let as_of = date(2024, 6, 1) + Duration::days(offset_days);
            prop_assert_eq!(classify_expiry(None, as_of), None);
        }
    }
}
