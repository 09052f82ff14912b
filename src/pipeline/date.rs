//! Date-wise aggregation: cumulative sums, daily differences, corrections,
//! and rolling averages.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::pipeline::types::{CaseRow, DatePoint};
use crate::pipeline::utility::mean;

/// Size of the trailing moving-average window, in observation dates.
pub const ROLLING_WINDOW: usize = 7;

/// Groups rows by observation date, sums counts across all regions, and
/// derives daily differences, forward-filled corrections, trailing 7-point
/// averages, and the growth rate of daily confirmed cases.
///
/// Rows without a parseable date are skipped. Output is in ascending date
/// order. The moving average is `None` until a full window of daily values
/// exists; that policy applies to every metric alike.
pub fn aggregate_by_date(rows: &[CaseRow]) -> Vec<DatePoint> {
    let mut groups: BTreeMap<NaiveDate, (f64, f64, f64)> = BTreeMap::new();

    for row in rows {
        let Some(date) = row.date else { continue };
        let entry = groups.entry(date).or_default();
        entry.0 += row.confirmed;
        entry.1 += row.deaths;
        entry.2 += row.recovered;
    }

    let dates: Vec<NaiveDate> = groups.keys().copied().collect();
    let confirmed: Vec<f64> = groups.values().map(|v| v.0).collect();
    let deaths: Vec<f64> = groups.values().map(|v| v.1).collect();
    let recovered: Vec<f64> = groups.values().map(|v| v.2).collect();
    let active: Vec<f64> = confirmed
        .iter()
        .zip(deaths.iter().zip(recovered.iter()))
        .map(|(c, (d, r))| c - (d + r))
        .collect();

    let daily_confirmed = forward_fill_negatives(&first_differences(&confirmed));
    let daily_deaths = forward_fill_negatives(&first_differences(&deaths));
    let daily_recovered = forward_fill_negatives(&first_differences(&recovered));
    let daily_active = forward_fill_negatives(&first_differences(&active));

    let avg7_confirmed = trailing_mean(&daily_confirmed, ROLLING_WINDOW);
    let avg7_deaths = trailing_mean(&daily_deaths, ROLLING_WINDOW);
    let avg7_recovered = trailing_mean(&daily_recovered, ROLLING_WINDOW);
    let avg7_active = trailing_mean(&daily_active, ROLLING_WINDOW);

    let growth_rate = growth_rates(&daily_confirmed);

    dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| DatePoint {
            date,
            confirmed: confirmed[i],
            deaths: deaths[i],
            recovered: recovered[i],
            active: active[i],
            daily_confirmed: daily_confirmed[i],
            daily_deaths: daily_deaths[i],
            daily_recovered: daily_recovered[i],
            daily_active: daily_active[i],
            avg7_confirmed: avg7_confirmed[i],
            avg7_deaths: avg7_deaths[i],
            avg7_recovered: avg7_recovered[i],
            avg7_active: avg7_active[i],
            growth_rate: growth_rate[i],
        })
        .collect()
}

/// First differences of a cumulative series. The first element is the
/// series' first value: the difference from an implicit zero baseline.
pub fn first_differences(series: &[f64]) -> Vec<f64> {
    series
        .iter()
        .enumerate()
        .map(|(i, v)| if i == 0 { *v } else { v - series[i - 1] })
        .collect()
}

/// Replaces negative entries with the prior entry's (already filled) value.
///
/// A negative daily difference is a data correction, treated as missing.
/// A leading negative becomes 0. Idempotent: filled output has no negative
/// entries, so a second pass changes nothing.
pub fn forward_fill_negatives(diffs: &[f64]) -> Vec<f64> {
    let mut filled = Vec::with_capacity(diffs.len());
    for (i, value) in diffs.iter().enumerate() {
        if *value >= 0.0 {
            filled.push(*value);
        } else if i == 0 {
            filled.push(0.0);
        } else {
            filled.push(filled[i - 1]);
        }
    }
    filled
}

/// Trailing simple moving average. `None` until `window` values exist.
pub fn trailing_mean(series: &[f64], window: usize) -> Vec<Option<f64>> {
    series
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                None
            } else {
                Some(mean(&series[i + 1 - window..=i]))
            }
        })
        .collect()
}

/// Percent change of consecutive daily values. `None` for the first entry
/// and wherever the prior value is 0.
fn growth_rates(daily: &[f64]) -> Vec<Option<f64>> {
    daily
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i == 0 || daily[i - 1] == 0.0 {
                None
            } else {
                Some((v / daily[i - 1] - 1.0) * 100.0)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, region: &str, confirmed: f64) -> CaseRow {
        CaseRow {
            date: Some(date.parse().unwrap()),
            region: region.to_string(),
            confirmed,
            deaths: 0.0,
            recovered: 0.0,
        }
    }

    #[test]
    fn test_correction_is_forward_filled() {
        // Cumulative [10, 8, 20] has diffs [10, -2, 12]; the -2 is a data
        // correction and carries the prior day's value instead.
        let rows = vec![
            row("2020-03-01", "A", 10.0),
            row("2020-03-02", "A", 8.0),
            row("2020-03-03", "A", 20.0),
        ];
        let series = aggregate_by_date(&rows);

        let daily: Vec<f64> = series.iter().map(|p| p.daily_confirmed).collect();
        assert_eq!(daily, vec![10.0, 10.0, 12.0]);
    }

    #[test]
    fn test_forward_fill_is_idempotent() {
        let diffs = vec![-1.0, 5.0, -3.0, -2.0, 4.0];
        let once = forward_fill_negatives(&diffs);
        let twice = forward_fill_negatives(&once);
        assert_eq!(once, twice);
        assert!(once.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_diffs_round_trip_to_cumulative() {
        let cumulative = vec![3.0, 7.0, 7.0, 15.0];
        let diffs = first_differences(&cumulative);

        let mut rebuilt = Vec::new();
        let mut acc = 0.0;
        for d in &diffs {
            acc += d;
            rebuilt.push(acc);
        }
        assert_eq!(rebuilt, cumulative);
    }

    #[test]
    fn test_rows_summed_across_regions_per_date() {
        let rows = vec![
            row("2020-03-01", "A", 4.0),
            row("2020-03-01", "B", 6.0),
            row("2020-03-02", "A", 5.0),
        ];
        let series = aggregate_by_date(&rows);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].confirmed, 10.0);
        assert_eq!(series[1].confirmed, 5.0);
    }

    #[test]
    fn test_rows_without_date_are_skipped() {
        let mut rows = vec![row("2020-03-01", "A", 4.0)];
        rows.push(CaseRow {
            date: None,
            region: "A".to_string(),
            confirmed: 100.0,
            deaths: 0.0,
            recovered: 0.0,
        });
        let series = aggregate_by_date(&rows);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].confirmed, 4.0);
    }

    #[test]
    fn test_ascending_date_order() {
        let rows = vec![
            row("2020-03-05", "A", 20.0),
            row("2020-03-01", "A", 10.0),
            row("2020-03-03", "A", 15.0),
        ];
        let series = aggregate_by_date(&rows);
        let dates: Vec<String> = series.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2020-03-01", "2020-03-03", "2020-03-05"]);
    }

    #[test]
    fn test_rolling_average_warm_up_is_undefined() {
        let rows: Vec<CaseRow> = (1..=9)
            .map(|day| row(&format!("2020-03-{day:02}"), "A", day as f64 * 10.0))
            .collect();
        let series = aggregate_by_date(&rows);

        for point in &series[..6] {
            assert_eq!(point.avg7_confirmed, None);
        }
        // Daily values are [10, 10, ..., 10], so every full window averages 10.
        assert_eq!(series[6].avg7_confirmed, Some(10.0));
        assert_eq!(series[8].avg7_confirmed, Some(10.0));
    }

    #[test]
    fn test_growth_rate() {
        let rows = vec![
            row("2020-03-01", "A", 10.0),
            row("2020-03-02", "A", 30.0),
            row("2020-03-03", "A", 40.0),
        ];
        let series = aggregate_by_date(&rows);

        // Daily [10, 20, 10]: first undefined, then +100%, then -50%.
        assert_eq!(series[0].growth_rate, None);
        assert_eq!(series[1].growth_rate, Some(100.0));
        assert_eq!(series[2].growth_rate, Some(-50.0));
    }
}
