//! Vaccination rollups: Indian state totals, WHO-region totals, per-country
//! coverage, and gender/age dose breakdowns.

use std::collections::BTreeMap;

use crate::pipeline::types::{
    CountryCoverage, DoseBreakdown, RegionVaccinationTotals, StateVaccinationTotals,
};
use crate::pipeline::utility::pct;
use crate::records::{CountryVaccinationRecord, StateVaccinationRecord};

/// The country-level rollup row present in the state-wise file. Skipped by
/// every state aggregation to avoid double counting.
const NATIONAL_ROLLUP: &str = "India";

/// Sums individuals vaccinated and doses administered per state, sorted by
/// individuals vaccinated, descending.
pub fn state_totals(records: &[StateVaccinationRecord]) -> Vec<StateVaccinationTotals> {
    let mut groups: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for record in records {
        if record.state == NATIONAL_ROLLUP {
            continue;
        }
        let entry = groups.entry(record.state.as_str()).or_default();
        entry.0 += record.total_individuals;
        entry.1 += record.total_doses;
    }

    let mut totals: Vec<StateVaccinationTotals> = groups
        .into_iter()
        .map(|(state, (total_individuals, total_doses))| StateVaccinationTotals {
            state: state.to_string(),
            total_individuals,
            total_doses,
        })
        .collect();

    totals.sort_by(|a, b| b.total_individuals.total_cmp(&a.total_individuals));
    totals
}

/// The `n` most vaccinated states. `totals` must come from [`state_totals`].
pub fn most_vaccinated(totals: &[StateVaccinationTotals], n: usize) -> Vec<StateVaccinationTotals> {
    totals.iter().take(n).cloned().collect()
}

/// The `n` least vaccinated states, ascending.
pub fn least_vaccinated(totals: &[StateVaccinationTotals], n: usize) -> Vec<StateVaccinationTotals> {
    totals.iter().rev().take(n).cloned().collect()
}

/// Sums total vaccinations per WHO region, sorted descending.
pub fn region_totals(records: &[CountryVaccinationRecord]) -> Vec<RegionVaccinationTotals> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();

    for record in records {
        *groups.entry(record.who_region.as_str()).or_default() += record.total_vaccinations;
    }

    let mut totals: Vec<RegionVaccinationTotals> = groups
        .into_iter()
        .map(|(region, total_vaccinations)| RegionVaccinationTotals {
            region: region.to_string(),
            total_vaccinations,
        })
        .collect();

    totals.sort_by(|a, b| b.total_vaccinations.total_cmp(&a.total_vaccinations));
    totals
}

/// Per-country coverage, sorted by total vaccinations, descending.
///
/// Countries with no recorded vaccinations get an undefined coverage
/// percentage, not a zero.
pub fn coverage_by_country(records: &[CountryVaccinationRecord]) -> Vec<CountryCoverage> {
    let mut coverage: Vec<CountryCoverage> = records
        .iter()
        .map(|r| CountryCoverage {
            country: r.country.clone(),
            who_region: r.who_region.clone(),
            total_vaccinations: r.total_vaccinations,
            total_vaccinations_per100: r.total_vaccinations_per100,
            percent_vaccinated: pct(r.persons_vaccinated_1plus, r.total_vaccinations),
        })
        .collect();

    coverage.sort_by(|a, b| b.total_vaccinations.total_cmp(&a.total_vaccinations));
    coverage
}

/// Nationwide dose totals by gender and age group.
pub fn dose_breakdown(records: &[StateVaccinationRecord]) -> DoseBreakdown {
    let mut breakdown = DoseBreakdown::default();

    for record in records {
        if record.state == NATIONAL_ROLLUP {
            continue;
        }
        breakdown.male_individuals += record.male_individuals;
        breakdown.female_individuals += record.female_individuals;
        breakdown.male_doses += record.male_doses;
        breakdown.female_doses += record.female_doses;
        breakdown.transgender_doses += record.transgender_doses;
        breakdown.doses_18_44 += record.doses_18_44;
        breakdown.doses_45_60 += record.doses_45_60;
        breakdown.doses_60_plus += record.doses_60_plus;
    }

    breakdown
}
