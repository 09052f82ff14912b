//! CSV ingestion with up-front schema validation.
//!
//! A missing required column is a fatal configuration error reported once,
//! by name, before any row is read. Malformed cells inside rows are handled
//! leniently by the record types in [`crate::records`].

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::pipeline::types::CaseRow;
use crate::records::{
    CountryVaccinationRecord, GlobalCaseRecord, IndiaCaseRecord, StateVaccinationRecord,
};

/// Loads every row of a CSV file after verifying the required columns exist.
///
/// # Errors
///
/// Fails if the file cannot be opened, if a required column is absent from
/// the header, or if a row cannot be deserialized at all (a structural
/// error, not a bad cell).
pub fn load_csv<T: DeserializeOwned>(path: &Path, required_columns: &[&str]) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?;
    for column in required_columns {
        if !headers.iter().any(|h| h == *column) {
            bail!(
                "required column `{}` missing from {}",
                column,
                path.display()
            );
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: T =
            result.with_context(|| format!("malformed row in {}", path.display()))?;
        rows.push(record);
    }

    debug!(path = %path.display(), rows = rows.len(), "CSV loaded");
    Ok(rows)
}

/// Loads the global case file and converts rows to canonical [`CaseRow`]s.
pub fn load_global_cases(path: &Path) -> Result<Vec<CaseRow>> {
    let records: Vec<GlobalCaseRecord> = load_csv(path, GlobalCaseRecord::REQUIRED_COLUMNS)?;
    Ok(records.iter().map(GlobalCaseRecord::to_case_row).collect())
}

/// Loads the India case file and converts rows to canonical [`CaseRow`]s.
pub fn load_india_cases(path: &Path) -> Result<Vec<CaseRow>> {
    let records: Vec<IndiaCaseRecord> = load_csv(path, IndiaCaseRecord::REQUIRED_COLUMNS)?;
    Ok(records.iter().map(IndiaCaseRecord::to_case_row).collect())
}

/// Loads the state-wise vaccination file.
pub fn load_state_vaccinations(path: &Path) -> Result<Vec<StateVaccinationRecord>> {
    load_csv(path, StateVaccinationRecord::REQUIRED_COLUMNS)
}

/// Loads the WHO country vaccination file.
pub fn load_country_vaccinations(path: &Path) -> Result<Vec<CountryVaccinationRecord>> {
    load_csv(path, CountryVaccinationRecord::REQUIRED_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_global_cases() {
        let file = write_temp(
            "SNo,ObservationDate,Province/State,Country/Region,Last Update,Confirmed,Deaths,Recovered\n\
             1,01/22/2020,Anhui,Mainland China,1/22/2020 17:00,1.0,0.0,0.0\n\
             2,01/22/2020,,Japan,1/22/2020 17:00,2.0,0.0,0.0\n",
        );
        let rows = load_global_cases(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region, "Mainland China");
        assert_eq!(rows[1].confirmed, 2.0);
    }

    #[test]
    fn test_missing_column_is_fatal_and_named() {
        let file = write_temp(
            "ObservationDate,Country/Region,Confirmed,Deaths\n\
             01/22/2020,Japan,2,0\n",
        );
        let err = load_global_cases(file.path()).unwrap_err();
        assert!(err.to_string().contains("required column `Recovered`"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_global_cases(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
