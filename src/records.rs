//! Raw CSV row types for the source datasets.
//!
//! Each struct mirrors one source file's column layout. Numeric fields use
//! lenient deserializers: a cell that does not parse becomes 0, an
//! unparseable date becomes `None`. A single bad cell never aborts a load;
//! only a missing column does (enforced in [`crate::loader`]).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::pipeline::types::CaseRow;

/// Date formats seen across the source files, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%d/%m/%Y", "%m/%d/%y", "%d-%m-%Y"];

/// Parses a date in any of the known source formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn lenient_date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.as_deref().and_then(parse_date))
}

fn lenient_count<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0))
}

/// One row of the global case file (`covid_19_data.csv`).
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalCaseRecord {
    #[serde(rename = "ObservationDate", default, deserialize_with = "lenient_date")]
    pub observation_date: Option<NaiveDate>,
    #[serde(rename = "Province/State", default)]
    pub province: Option<String>,
    #[serde(rename = "Country/Region")]
    pub country: String,
    #[serde(rename = "Confirmed", default, deserialize_with = "lenient_count")]
    pub confirmed: f64,
    #[serde(rename = "Deaths", default, deserialize_with = "lenient_count")]
    pub deaths: f64,
    #[serde(rename = "Recovered", default, deserialize_with = "lenient_count")]
    pub recovered: f64,
}

impl GlobalCaseRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "ObservationDate",
        "Country/Region",
        "Confirmed",
        "Deaths",
        "Recovered",
    ];

    /// Converts to the canonical pipeline row, keyed by country.
    pub fn to_case_row(&self) -> CaseRow {
        CaseRow {
            date: self.observation_date,
            region: self.country.clone(),
            confirmed: self.confirmed,
            deaths: self.deaths,
            recovered: self.recovered,
        }
    }
}

/// One row of the India case file (`covid_19_india.csv`).
///
/// `Cured` plays the role `Recovered` plays in the global file.
#[derive(Debug, Clone, Deserialize)]
pub struct IndiaCaseRecord {
    #[serde(rename = "Date", default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "State/UnionTerritory")]
    pub state: String,
    #[serde(rename = "Cured", default, deserialize_with = "lenient_count")]
    pub cured: f64,
    #[serde(rename = "Deaths", default, deserialize_with = "lenient_count")]
    pub deaths: f64,
    #[serde(rename = "Confirmed", default, deserialize_with = "lenient_count")]
    pub confirmed: f64,
}

impl IndiaCaseRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] =
        &["Date", "State/UnionTerritory", "Cured", "Deaths", "Confirmed"];

    /// Converts to the canonical pipeline row, keyed by state.
    pub fn to_case_row(&self) -> CaseRow {
        CaseRow {
            date: self.date,
            region: self.state.clone(),
            confirmed: self.confirmed,
            deaths: self.deaths,
            recovered: self.cured,
        }
    }
}

/// One row of the state-wise vaccination file (`covid_vaccine_statewise.csv`).
///
/// The file carries a country-level rollup under the state name "India";
/// aggregations skip it to avoid double counting.
#[derive(Debug, Clone, Deserialize)]
pub struct StateVaccinationRecord {
    #[serde(rename = "Updated On", default, deserialize_with = "lenient_date")]
    pub updated_on: Option<NaiveDate>,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(
        rename = "Total Individuals Vaccinated",
        default,
        deserialize_with = "lenient_count"
    )]
    pub total_individuals: f64,
    #[serde(
        rename = "Total Doses Administered",
        default,
        deserialize_with = "lenient_count"
    )]
    pub total_doses: f64,
    #[serde(
        rename = "First Dose Administered",
        default,
        deserialize_with = "lenient_count"
    )]
    pub first_dose: f64,
    #[serde(
        rename = "Second Dose Administered",
        default,
        deserialize_with = "lenient_count"
    )]
    pub second_dose: f64,
    #[serde(
        rename = "Male(Individuals Vaccinated)",
        default,
        deserialize_with = "lenient_count"
    )]
    pub male_individuals: f64,
    #[serde(
        rename = "Female(Individuals Vaccinated)",
        default,
        deserialize_with = "lenient_count"
    )]
    pub female_individuals: f64,
    #[serde(
        rename = "Male (Doses Administered)",
        default,
        deserialize_with = "lenient_count"
    )]
    pub male_doses: f64,
    #[serde(
        rename = "Female (Doses Administered)",
        default,
        deserialize_with = "lenient_count"
    )]
    pub female_doses: f64,
    #[serde(
        rename = "Transgender (Doses Administered)",
        default,
        deserialize_with = "lenient_count"
    )]
    pub transgender_doses: f64,
    #[serde(
        rename = "18-44 Years (Doses Administered)",
        default,
        deserialize_with = "lenient_count"
    )]
    pub doses_18_44: f64,
    #[serde(
        rename = "45-60 Years (Doses Administered)",
        default,
        deserialize_with = "lenient_count"
    )]
    pub doses_45_60: f64,
    #[serde(
        rename = "60+ Years (Doses Administered)",
        default,
        deserialize_with = "lenient_count"
    )]
    pub doses_60_plus: f64,
}

impl StateVaccinationRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] =
        &["Updated On", "State", "Total Individuals Vaccinated"];
}

/// One row of the WHO country vaccination file (`vaccination-data.csv`).
#[derive(Debug, Clone, Deserialize)]
pub struct CountryVaccinationRecord {
    #[serde(rename = "COUNTRY")]
    pub country: String,
    #[serde(rename = "WHO_REGION")]
    pub who_region: String,
    #[serde(rename = "DATE_UPDATED", default, deserialize_with = "lenient_date")]
    pub date_updated: Option<NaiveDate>,
    #[serde(
        rename = "TOTAL_VACCINATIONS",
        default,
        deserialize_with = "lenient_count"
    )]
    pub total_vaccinations: f64,
    #[serde(
        rename = "PERSONS_VACCINATED_1PLUS_DOSE",
        default,
        deserialize_with = "lenient_count"
    )]
    pub persons_vaccinated_1plus: f64,
    #[serde(
        rename = "TOTAL_VACCINATIONS_PER100",
        default,
        deserialize_with = "lenient_count"
    )]
    pub total_vaccinations_per100: f64,
}

impl CountryVaccinationRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] =
        &["COUNTRY", "WHO_REGION", "TOTAL_VACCINATIONS"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_known_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 30).unwrap();
        assert_eq!(parse_date("01/30/2020"), Some(expected));
        assert_eq!(parse_date("2020-01-30"), Some(expected));
        assert_eq!(parse_date("30/01/2020"), Some(expected));
        assert_eq!(parse_date(" 2020-01-30 "), Some(expected));
    }

    #[test]
    fn test_parse_date_garbage_is_none() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_lenient_count_bad_cell_becomes_zero() {
        let csv = "ObservationDate,Country/Region,Confirmed,Deaths,Recovered\n\
                   01/22/2020,Japan,n/a,2,1\n";
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let record: GlobalCaseRecord = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(record.confirmed, 0.0);
        assert_eq!(record.deaths, 2.0);
    }

    #[test]
    fn test_bad_date_becomes_none() {
        let csv = "Date,State/UnionTerritory,Cured,Deaths,Confirmed\n\
                   garbage,Kerala,0,0,1\n";
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let record: IndiaCaseRecord = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(record.date, None);
        assert_eq!(record.confirmed, 1.0);
    }

    #[test]
    fn test_india_record_maps_cured_to_recovered() {
        let record = IndiaCaseRecord {
            date: None,
            state: "Kerala".to_string(),
            cured: 7.0,
            deaths: 1.0,
            confirmed: 10.0,
        };
        let row = record.to_case_row();
        assert_eq!(row.recovered, 7.0);
        assert_eq!(row.region, "Kerala");
    }

    #[test]
    fn test_missing_optional_vaccine_columns_default_to_zero() {
        let csv = "Updated On,State,Total Individuals Vaccinated\n\
                   16/01/2021,Kerala,100\n";
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let record: StateVaccinationRecord = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(record.total_individuals, 100.0);
        assert_eq!(record.male_doses, 0.0);
        assert_eq!(record.doses_60_plus, 0.0);
    }
}
