//! Sum-based per-region aggregation.

use std::collections::BTreeMap;

use crate::pipeline::types::{CaseRow, RegionTotals};
use crate::pipeline::utility::pct;

/// Groups rows by region, sums the count columns, and derives active cases
/// and mortality/recovery rates.
///
/// Duplicate snapshots for the same region and date are summed: this table
/// answers "total activity up to today", not "status as of the latest
/// report" (that is [`crate::pipeline::pivot::pivot_max_by_region`]).
/// Results are sorted by confirmed cases, descending.
pub fn aggregate_by_region(rows: &[CaseRow]) -> Vec<RegionTotals> {
    let mut groups: BTreeMap<&str, (f64, f64, f64)> = BTreeMap::new();

    for row in rows {
        let entry = groups.entry(row.region.as_str()).or_default();
        entry.0 += row.confirmed;
        entry.1 += row.deaths;
        entry.2 += row.recovered;
    }

    let mut totals: Vec<RegionTotals> = groups
        .into_iter()
        .map(|(region, (confirmed, deaths, recovered))| RegionTotals {
            region: region.to_string(),
            confirmed,
            deaths,
            recovered,
            active: confirmed - (deaths + recovered),
            mortality_rate: pct(deaths, confirmed),
            recovery_rate: pct(recovered, confirmed),
        })
        .collect();

    totals.sort_by(|a, b| b.confirmed.total_cmp(&a.confirmed));
    totals
}

/// Returns the `n` largest totals by an arbitrary key, descending.
///
/// The original dashboard's "top 10 by active cases" and "top 10 by
/// mortality rate" views are both this with a different key.
pub fn top_n_by<F>(totals: &[RegionTotals], n: usize, key: F) -> Vec<RegionTotals>
where
    F: Fn(&RegionTotals) -> f64,
{
    let mut ranked: Vec<RegionTotals> = totals.to_vec();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(region: &str, confirmed: f64, deaths: f64, recovered: f64) -> CaseRow {
        CaseRow {
            date: None,
            region: region.to_string(),
            confirmed,
            deaths,
            recovered,
        }
    }

    #[test]
    fn test_two_rows_same_region_sum() {
        let rows = vec![row("A", 100.0, 5.0, 0.0), row("A", 50.0, 0.0, 0.0)];
        let totals = aggregate_by_region(&rows);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].confirmed, 150.0);
        assert_eq!(totals[0].deaths, 5.0);
        let mortality = totals[0].mortality_rate.unwrap();
        assert!((mortality - 3.333333333333333).abs() < 1e-9);
    }

    #[test]
    fn test_active_derivation() {
        let rows = vec![row("A", 100.0, 10.0, 30.0)];
        let totals = aggregate_by_region(&rows);
        assert_eq!(totals[0].active, 60.0);
    }

    #[test]
    fn test_zero_confirmed_rates_undefined() {
        let rows = vec![row("Empty", 0.0, 0.0, 0.0)];
        let totals = aggregate_by_region(&rows);
        assert_eq!(totals[0].mortality_rate, None);
        assert_eq!(totals[0].recovery_rate, None);
    }

    #[test]
    fn test_sum_invariant_across_regions() {
        let rows = vec![
            row("A", 1.0, 0.0, 0.0),
            row("B", 2.0, 1.0, 1.0),
            row("A", 3.0, 1.0, 2.0),
            row("B", 4.0, 0.0, 0.0),
        ];
        let totals = aggregate_by_region(&rows);

        for t in &totals {
            let expected: f64 = rows
                .iter()
                .filter(|r| r.region == t.region)
                .map(|r| r.confirmed)
                .sum();
            assert_eq!(t.confirmed, expected);
        }
    }

    #[test]
    fn test_sorted_by_confirmed_descending() {
        let rows = vec![row("Low", 1.0, 0.0, 0.0), row("High", 10.0, 0.0, 0.0)];
        let totals = aggregate_by_region(&rows);
        assert_eq!(totals[0].region, "High");
        assert_eq!(totals[1].region, "Low");
    }

    #[test]
    fn test_top_n_by_active() {
        let rows = vec![
            row("A", 10.0, 0.0, 0.0),
            row("B", 9.0, 0.0, 8.0),
            row("C", 5.0, 0.0, 0.0),
        ];
        let totals = aggregate_by_region(&rows);
        let top = top_n_by(&totals, 2, |t| t.active);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].region, "A");
        assert_eq!(top[1].region, "C");
    }
}
