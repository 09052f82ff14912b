//! Cleaning and region-name canonicalization.
//!
//! Both passes must run before any aggregation: rate calculations assume
//! non-negative counts, and grouping assumes one label per region.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::pipeline::types::CaseRow;

/// Sentinel for a missing region label.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Alias fixes for the India case file: footnote asterisks and one
/// misspelling.
pub static INDIA_STATE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Maharashtra***", "Maharashtra"),
        ("Bihar****", "Bihar"),
        ("Madhya Pradesh***", "Madhya Pradesh"),
        ("Karanataka", "Karnataka"),
    ])
});

/// Alias fixes for the "complete" India dataset: misspellings and the long
/// union-territory prefixes.
pub static COMPLETE_STATE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Telengana", "Telangana"),
        ("Telangana***", "Telangana"),
        ("Union Territory of Ladakh", "Ladakh"),
        ("Union Territory of Jammu and Kashmir", "Jammu and Kashmir"),
        ("Union Territory of Chandigarh", "Chandigarh"),
    ])
});

/// Clamps counts to zero and fills empty region labels with
/// [`UNKNOWN_REGION`].
///
/// Negative source counts are data-entry corrections; they must not leak
/// into sums or rate denominators.
pub fn clean(rows: &mut [CaseRow]) {
    for row in rows.iter_mut() {
        if row.region.trim().is_empty() {
            row.region = UNKNOWN_REGION.to_string();
        }
        row.confirmed = row.confirmed.max(0.0);
        row.deaths = row.deaths.max(0.0);
        row.recovered = row.recovered.max(0.0);
    }
}

/// Rewrites region labels through an exact-match alias table.
///
/// Unmapped labels pass through unchanged. Must run before grouping or
/// totals are silently split across aliases.
pub fn normalize_region_names(rows: &mut [CaseRow], aliases: &HashMap<&str, &str>) {
    for row in rows.iter_mut() {
        if let Some(canonical) = aliases.get(row.region.as_str()) {
            row.region = (*canonical).to_string();
        }
    }
}
