//! Session orchestration: load, clean, canonicalize, and aggregate every
//! dataset into the full set of dashboard tables.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cache::FileCache;
use crate::clean::{INDIA_STATE_ALIASES, clean, normalize_region_names};
use crate::loader;
use crate::pipeline::types::{
    CaseRow, CountryCoverage, DatePoint, DoseBreakdown, RegionTotals, RegionVaccinationTotals,
    StateSummary, StateVaccinationTotals,
};
use crate::pipeline::{date, pivot, region, vaccination};
use crate::records::{CountryVaccinationRecord, StateVaccinationRecord};

/// Locations of the four source files.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub global_cases: PathBuf,
    pub india_cases: PathBuf,
    pub state_vaccinations: PathBuf,
    pub country_vaccinations: PathBuf,
}

/// All vaccination rollups together.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VaccinationSummary {
    pub state_totals: Vec<StateVaccinationTotals>,
    pub region_totals: Vec<RegionVaccinationTotals>,
    pub coverage: Vec<CountryCoverage>,
    pub dose_breakdown: DoseBreakdown,
}

/// The four derived tables a dashboard consumes.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardTables {
    pub region_totals: Vec<RegionTotals>,
    pub date_series: Vec<DatePoint>,
    pub state_summaries: Vec<StateSummary>,
    pub vaccination: VaccinationSummary,
}

/// One interactive session's worth of memoized loads.
///
/// Each cache is keyed by source path and invalidated by file modification
/// time, so editing a source file is enough to get fresh tables on the next
/// build. [`Session::refresh`] drops everything explicitly.
#[derive(Default)]
pub struct Session {
    cases: FileCache<Vec<CaseRow>>,
    state_vaccinations: FileCache<Vec<StateVaccinationRecord>>,
    country_vaccinations: FileCache<Vec<CountryVaccinationRecord>>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Cleaned global case rows, memoized.
    pub fn global_rows(&mut self, path: &Path) -> Result<&Vec<CaseRow>> {
        self.cases.get_or_load(path, |p| {
            let mut rows = loader::load_global_cases(p)?;
            clean(&mut rows);
            Ok(rows)
        })
    }

    /// Cleaned, alias-normalized India case rows, memoized.
    pub fn india_rows(&mut self, path: &Path) -> Result<&Vec<CaseRow>> {
        self.cases.get_or_load(path, |p| {
            let mut rows = loader::load_india_cases(p)?;
            clean(&mut rows);
            normalize_region_names(&mut rows, &INDIA_STATE_ALIASES);
            Ok(rows)
        })
    }

    /// State vaccination records, memoized.
    pub fn state_vaccination_rows(&mut self, path: &Path) -> Result<&Vec<StateVaccinationRecord>> {
        self.state_vaccinations
            .get_or_load(path, |p| loader::load_state_vaccinations(p))
    }

    /// Country vaccination records, memoized.
    pub fn country_vaccination_rows(
        &mut self,
        path: &Path,
    ) -> Result<&Vec<CountryVaccinationRecord>> {
        self.country_vaccinations
            .get_or_load(path, |p| loader::load_country_vaccinations(p))
    }

    /// Builds every derived table in one pass.
    ///
    /// Runs to completion or fails outright on the first fatal error; there
    /// are no partial results.
    pub fn build_tables(&mut self, paths: &DatasetPaths) -> Result<DashboardTables> {
        let global = self.global_rows(&paths.global_cases)?;
        let region_totals = region::aggregate_by_region(global);
        let date_series = date::aggregate_by_date(global);

        let india = self.india_rows(&paths.india_cases)?;
        let state_summaries = pivot::pivot_max_by_region(india);

        let state_records = self.state_vaccination_rows(&paths.state_vaccinations)?;
        let state_totals = vaccination::state_totals(state_records);
        let dose_breakdown = vaccination::dose_breakdown(state_records);

        let country_records = self.country_vaccination_rows(&paths.country_vaccinations)?;
        let region_vaccinations = vaccination::region_totals(country_records);
        let coverage = vaccination::coverage_by_country(country_records);

        info!(
            regions = region_totals.len(),
            dates = date_series.len(),
            states = state_summaries.len(),
            vaccinated_states = state_totals.len(),
            "Dashboard tables built"
        );

        Ok(DashboardTables {
            region_totals,
            date_series,
            state_summaries,
            vaccination: VaccinationSummary {
                state_totals,
                region_totals: region_vaccinations,
                coverage,
                dose_breakdown,
            },
        })
    }

    /// Drops every memoized load. The next build rereads all sources.
    pub fn refresh(&mut self) {
        self.cases.clear();
        self.state_vaccinations.clear();
        self.country_vaccinations.clear();
    }
}
