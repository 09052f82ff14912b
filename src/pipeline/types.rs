//! Data types flowing through the aggregation pipeline.
//!
//! Rates are `Option<f64>`: `None` means the rate is undefined because the
//! denominator (confirmed cases) is zero. The `None` survives serialization
//! as a JSON `null` / empty CSV cell, so degenerate math never panics and
//! never masquerades as a real zero.

use chrono::NaiveDate;
use serde::Serialize;

/// A cleaned, canonical case record: one region's cumulative snapshot on
/// one date.
///
/// `date` is `None` when the source cell did not parse; such rows still
/// count toward region totals and the state pivot but are skipped by the
/// date series.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRow {
    pub date: Option<NaiveDate>,
    pub region: String,
    pub confirmed: f64,
    pub deaths: f64,
    pub recovered: f64,
}

/// Sum-based aggregate for one region (country or state).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionTotals {
    pub region: String,
    pub confirmed: f64,
    pub deaths: f64,
    pub recovered: f64,
    /// confirmed - (deaths + recovered)
    pub active: f64,
    /// deaths / confirmed * 100, undefined when confirmed is 0
    pub mortality_rate: Option<f64>,
    /// recovered / confirmed * 100, undefined when confirmed is 0
    pub recovery_rate: Option<f64>,
}

/// One point of the date-wise series, summed across all regions.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub confirmed: f64,
    pub deaths: f64,
    pub recovered: f64,
    pub active: f64,

    // First differences in date order. The first point's daily value is its
    // cumulative value; negative differences (data corrections) are
    // replaced by the prior day's daily value.
    pub daily_confirmed: f64,
    pub daily_deaths: f64,
    pub daily_recovered: f64,
    pub daily_active: f64,

    // Trailing 7-point simple moving averages of the daily values. `None`
    // until a full window is available.
    pub avg7_confirmed: Option<f64>,
    pub avg7_deaths: Option<f64>,
    pub avg7_recovered: Option<f64>,
    pub avg7_active: Option<f64>,

    /// Percent change of daily confirmed vs. the prior day. Undefined for
    /// the first point and whenever the prior day's value is 0.
    pub growth_rate: Option<f64>,
}

/// Max-based pivot for one Indian state: the latest cumulative values.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StateSummary {
    pub state: String,
    pub confirmed: f64,
    pub cured: f64,
    pub deaths: f64,
    /// confirmed - (cured + deaths), from the per-column maxima
    pub active: f64,
    pub recovery_rate: Option<f64>,
    pub mortality_rate: Option<f64>,
}

/// Summed individuals vaccinated for one Indian state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StateVaccinationTotals {
    pub state: String,
    pub total_individuals: f64,
    pub total_doses: f64,
}

/// Summed total vaccinations for one WHO region.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionVaccinationTotals {
    pub region: String,
    pub total_vaccinations: f64,
}

/// Per-country vaccination coverage.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryCoverage {
    pub country: String,
    pub who_region: String,
    pub total_vaccinations: f64,
    pub total_vaccinations_per100: f64,
    /// persons with 1+ dose / total vaccinations * 100, undefined when no
    /// vaccinations are recorded
    pub percent_vaccinated: Option<f64>,
}

/// Nationwide dose totals by gender and age group.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DoseBreakdown {
    pub male_individuals: f64,
    pub female_individuals: f64,
    pub male_doses: f64,
    pub female_doses: f64,
    pub transgender_doses: f64,
    pub doses_18_44: f64,
    pub doses_45_60: f64,
    pub doses_60_plus: f64,
}
