use crate::models::{Bar, MonthKey};
use std::collections::BTreeMap;

/// Extracts, per calendar month, the full-history running VWAP as of the
/// last bar on that month's last trading day.
///
/// The accumulation never resets at day or month boundaries: this is a
/// running VWAP over the entire input series, not a per-day VWAP. Bars must
/// be in timestamp order. A month whose closing bar has no computable VWAP
/// (zero cumulative volume) gets no entry.
pub fn compute_monthly_last_vwap(bars: &[Bar]) -> BTreeMap<MonthKey, f64> {
    let mut cumulative_volume = 0.0;
    let mut cumulative_price_volume = 0.0;
    let mut last_per_month: BTreeMap<MonthKey, Option<f64>> = BTreeMap::new();

    for bar in bars {
        cumulative_volume += bar.volume;
        cumulative_price_volume += bar.close * bar.volume;

        let vwap = if cumulative_volume > 0.0 {
            Some(cumulative_price_volume / cumulative_volume)
        } else {
            None
        };

        // Later bars overwrite, so each month ends up holding the value of
        // its final observation.
        last_per_month.insert(MonthKey::from_datetime(bar.date), vwap);
    }

    last_per_month
        .into_iter()
        .filter_map(|(month, vwap)| vwap.map(|value| (month, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bar(year: i32, month: u32, day: u32, hour: u32, close: f64, volume: f64) -> Bar {
        let date = Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap();
        Bar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    #[test]
    fn running_vwap_is_volume_weighted() {
        let bars = vec![
            bar(2024, 1, 2, 10, 10.0, 100.0),
            bar(2024, 1, 2, 11, 20.0, 100.0),
        ];
        let monthly = compute_monthly_last_vwap(&bars);
        assert_eq!(monthly.len(), 1);
        let vwap = monthly[&MonthKey::new(2024, 1)];
        assert!((vwap - 15.0).abs() < 1e-12);
    }

    #[test]
    fn accumulation_does_not_reset_across_months() {
        let bars = vec![
            bar(2024, 1, 31, 15, 10.0, 100.0),
            bar(2024, 2, 29, 15, 20.0, 100.0),
        ];
        let monthly = compute_monthly_last_vwap(&bars);
        assert!((monthly[&MonthKey::new(2024, 1)] - 10.0).abs() < 1e-12);
        // February carries January's volume: (10*100 + 20*100) / 200.
        assert!((monthly[&MonthKey::new(2024, 2)] - 15.0).abs() < 1e-12);
    }

    #[test]
    fn takes_last_bar_of_last_day_in_each_month() {
        let bars = vec![
            bar(2024, 1, 30, 10, 10.0, 100.0),
            bar(2024, 1, 31, 10, 30.0, 100.0),
            bar(2024, 1, 31, 15, 50.0, 200.0),
        ];
        let monthly = compute_monthly_last_vwap(&bars);
        // (10*100 + 30*100 + 50*200) / 400 = 35.0
        assert!((monthly[&MonthKey::new(2024, 1)] - 35.0).abs() < 1e-12);
    }

    #[test]
    fn zero_volume_month_has_no_entry() {
        let bars = vec![bar(2024, 1, 2, 10, 10.0, 0.0), bar(2024, 1, 3, 10, 12.0, 0.0)];
        let monthly = compute_monthly_last_vwap(&bars);
        assert!(monthly.is_empty());
    }

    #[test]
    fn vwap_defined_once_volume_prints() {
        let bars = vec![
            bar(2024, 1, 2, 10, 10.0, 0.0),
            bar(2024, 1, 3, 10, 12.0, 50.0),
        ];
        let monthly = compute_monthly_last_vwap(&bars);
        assert!((monthly[&MonthKey::new(2024, 1)] - 12.0).abs() < 1e-12);
    }

    #[test]
    fn pure_function_is_idempotent() {
        let bars = vec![
            bar(2024, 1, 2, 10, 10.0, 100.0),
            bar(2024, 2, 2, 10, 20.0, 150.0),
        ];
        assert_eq!(
            compute_monthly_last_vwap(&bars),
            compute_monthly_last_vwap(&bars)
        );
    }

    #[test]
    fn empty_series_yields_empty_map() {
        assert!(compute_monthly_last_vwap(&[]).is_empty());
    }
}
