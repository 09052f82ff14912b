//! Max-based per-state pivot.

use std::collections::BTreeMap;

use crate::pipeline::types::{CaseRow, StateSummary};
use crate::pipeline::utility::pct;

/// Takes the maximum cumulative value per count column for each state.
///
/// Source rows are cumulative-to-date snapshots, so the max is the latest
/// reported total. Rates are derived from the maxima the same way
/// [`crate::pipeline::region::aggregate_by_region`] derives them from sums.
/// Results are sorted by confirmed cases, descending.
pub fn pivot_max_by_region(rows: &[CaseRow]) -> Vec<StateSummary> {
    let mut groups: BTreeMap<&str, (f64, f64, f64)> = BTreeMap::new();

    for row in rows {
        let entry = groups.entry(row.region.as_str()).or_default();
        entry.0 = entry.0.max(row.confirmed);
        entry.1 = entry.1.max(row.recovered);
        entry.2 = entry.2.max(row.deaths);
    }

    let mut summaries: Vec<StateSummary> = groups
        .into_iter()
        .map(|(state, (confirmed, cured, deaths))| StateSummary {
            state: state.to_string(),
            confirmed,
            cured,
            deaths,
            active: confirmed - (cured + deaths),
            recovery_rate: pct(cured, confirmed),
            mortality_rate: pct(deaths, confirmed),
        })
        .collect();

    summaries.sort_by(|a, b| b.confirmed.total_cmp(&a.confirmed));
    summaries
}

/// The `n` states with the most active cases, descending.
pub fn top_active_states(summaries: &[StateSummary], n: usize) -> Vec<StateSummary> {
    let mut ranked: Vec<StateSummary> = summaries.to_vec();
    ranked.sort_by(|a, b| b.active.total_cmp(&a.active));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, confirmed: f64, cured: f64, deaths: f64) -> CaseRow {
        CaseRow {
            date: None,
            region: state.to_string(),
            confirmed,
            deaths,
            recovered: cured,
        }
    }

    #[test]
    fn test_max_taken_per_column() {
        let rows = vec![
            row("Kerala", 100.0, 40.0, 2.0),
            row("Kerala", 150.0, 90.0, 3.0),
            row("Kerala", 120.0, 80.0, 1.0),
        ];
        let summaries = pivot_max_by_region(&rows);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].confirmed, 150.0);
        assert_eq!(summaries[0].cured, 90.0);
        assert_eq!(summaries[0].deaths, 3.0);
    }

    #[test]
    fn test_max_dominates_every_row() {
        let rows = vec![
            row("Goa", 10.0, 1.0, 0.0),
            row("Goa", 25.0, 5.0, 1.0),
            row("Goa", 18.0, 9.0, 0.0),
        ];
        let summaries = pivot_max_by_region(&rows);
        for r in &rows {
            assert!(summaries[0].confirmed >= r.confirmed);
            assert!(summaries[0].cured >= r.recovered);
            assert!(summaries[0].deaths >= r.deaths);
        }
    }

    #[test]
    fn test_rates_from_maxima() {
        let rows = vec![row("Kerala", 200.0, 150.0, 10.0)];
        let summaries = pivot_max_by_region(&rows);
        assert_eq!(summaries[0].recovery_rate, Some(75.0));
        assert_eq!(summaries[0].mortality_rate, Some(5.0));
    }

    #[test]
    fn test_zero_confirmed_rates_undefined() {
        let rows = vec![row("Empty", 0.0, 0.0, 0.0)];
        let summaries = pivot_max_by_region(&rows);
        assert_eq!(summaries[0].recovery_rate, None);
        assert_eq!(summaries[0].mortality_rate, None);
    }

    #[test]
    fn test_sorted_and_top_active() {
        let rows = vec![
            row("A", 100.0, 90.0, 5.0),
            row("B", 80.0, 10.0, 0.0),
            row("C", 50.0, 0.0, 0.0),
        ];
        let summaries = pivot_max_by_region(&rows);
        assert_eq!(summaries[0].state, "A");

        let top = top_active_states(&summaries, 2);
        assert_eq!(top[0].state, "B");
        assert_eq!(top[1].state, "C");
    }
}
