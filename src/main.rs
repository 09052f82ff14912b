//! CLI entry point for the COVID-19 statistics tool.
//!
//! Provides subcommands for each derived table: country totals, the
//! date-wise series, the India state pivot, vaccination rollups, and a
//! bulk export of everything as CSV files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use covid_stats::clean::{INDIA_STATE_ALIASES, clean, normalize_region_names};
use covid_stats::pipeline::builder::{DatasetPaths, Session, VaccinationSummary};
use covid_stats::pipeline::{date, pivot, region, vaccination};
use covid_stats::{geo, loader, output};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "covid_stats")]
#[command(about = "Prepare COVID-19 CSV datasets into dashboard summary tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Country-level totals from the global case file
    World {
        /// Path to the global case CSV
        #[arg(value_name = "CSV", default_value = "covid_19_data.csv")]
        input: String,

        /// Keep only the N regions with the most confirmed cases
        #[arg(short, long)]
        top: Option<usize>,

        /// CSV file to write the table to, in addition to stdout JSON
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Date-wise series with daily differences and 7-day averages
    Datewise {
        /// Path to the global case CSV
        #[arg(value_name = "CSV", default_value = "covid_19_data.csv")]
        input: String,

        /// CSV file to write the table to, in addition to stdout JSON
        #[arg(short, long)]
        output: Option<String>,
    },
    /// State-wise pivot summary for India
    India {
        /// Path to the India case CSV
        #[arg(value_name = "CSV", default_value = "covid_19_india.csv")]
        input: String,

        /// GeoJSON boundary file to check state names against
        #[arg(long)]
        geojson: Option<String>,

        /// Property holding the region name in each GeoJSON feature
        #[arg(long, default_value = "ST_NM")]
        name_property: String,

        /// CSV file to write the table to, in addition to stdout JSON
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Vaccination rollups: state totals, WHO-region totals, coverage
    Vaccination {
        /// Path to the state-wise vaccination CSV
        #[arg(long, default_value = "covid_vaccine_statewise.csv")]
        states: String,

        /// Path to the WHO country vaccination CSV
        #[arg(long, default_value = "vaccination-data.csv")]
        countries: String,

        /// Keep only the N most and least vaccinated states
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Build every derived table and write them as CSV files
    ExportAll {
        /// Path to the global case CSV
        #[arg(long, default_value = "covid_19_data.csv")]
        global_cases: String,

        /// Path to the India case CSV
        #[arg(long, default_value = "covid_19_india.csv")]
        india_cases: String,

        /// Path to the state-wise vaccination CSV
        #[arg(long, default_value = "covid_vaccine_statewise.csv")]
        state_vaccinations: String,

        /// Path to the WHO country vaccination CSV
        #[arg(long, default_value = "vaccination-data.csv")]
        country_vaccinations: String,

        /// Directory to write the table CSVs into
        #[arg(short, long, default_value = "tables")]
        out_dir: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/covid_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("covid_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::World { input, top, output } => {
            let mut rows = loader::load_global_cases(Path::new(&input))?;
            clean(&mut rows);

            let mut totals = region::aggregate_by_region(&rows);
            if let Some(n) = top {
                totals.truncate(n);
            }

            info!(regions = totals.len(), "Region totals computed");
            output::print_json(&totals)?;
            if let Some(path) = output {
                output::write_table_csv(&path, &totals)?;
            }
        }
        Commands::Datewise { input, output } => {
            let mut rows = loader::load_global_cases(Path::new(&input))?;
            clean(&mut rows);

            let series = date::aggregate_by_date(&rows);

            info!(dates = series.len(), "Date-wise series computed");
            output::print_json(&series)?;
            if let Some(path) = output {
                output::write_table_csv(&path, &series)?;
            }
        }
        Commands::India {
            input,
            geojson,
            name_property,
            output,
        } => {
            let mut rows = loader::load_india_cases(Path::new(&input))?;
            clean(&mut rows);
            normalize_region_names(&mut rows, &INDIA_STATE_ALIASES);

            let summaries = pivot::pivot_max_by_region(&rows);
            info!(states = summaries.len(), "State summaries computed");

            if let Some(geojson_path) = geojson {
                let boundary_names =
                    geo::load_region_names(Path::new(&geojson_path), &name_property)?;
                let states: Vec<String> = summaries.iter().map(|s| s.state.clone()).collect();
                for state in geo::unmatched_regions(&states, &boundary_names) {
                    warn!(state, "State absent from boundary file, a map would drop it");
                }
            }

            output::print_json(&summaries)?;
            if let Some(path) = output {
                output::write_table_csv(&path, &summaries)?;
            }
        }
        Commands::Vaccination {
            states,
            countries,
            top,
        } => {
            let state_records = loader::load_state_vaccinations(Path::new(&states))?;
            let country_records = loader::load_country_vaccinations(Path::new(&countries))?;

            let mut state_totals = vaccination::state_totals(&state_records);
            if let Some(n) = top {
                state_totals = vaccination::most_vaccinated(&state_totals, n);
            }

            let summary = VaccinationSummary {
                state_totals,
                region_totals: vaccination::region_totals(&country_records),
                coverage: vaccination::coverage_by_country(&country_records),
                dose_breakdown: vaccination::dose_breakdown(&state_records),
            };
            output::print_json(&summary)?;
        }
        Commands::ExportAll {
            global_cases,
            india_cases,
            state_vaccinations,
            country_vaccinations,
            out_dir,
        } => {
            let paths = DatasetPaths {
                global_cases: global_cases.into(),
                india_cases: india_cases.into(),
                state_vaccinations: state_vaccinations.into(),
                country_vaccinations: country_vaccinations.into(),
            };

            let mut session = Session::new();
            let tables = session.build_tables(&paths)?;

            std::fs::create_dir_all(&out_dir)?;
            let out = Path::new(&out_dir);
            write_table(out, "region_totals.csv", &tables.region_totals)?;
            write_table(out, "date_series.csv", &tables.date_series)?;
            write_table(out, "state_summaries.csv", &tables.state_summaries)?;
            write_table(out, "vaccination_states.csv", &tables.vaccination.state_totals)?;
            write_table(out, "vaccination_regions.csv", &tables.vaccination.region_totals)?;
            write_table(out, "vaccination_coverage.csv", &tables.vaccination.coverage)?;
            write_table(
                out,
                "vaccination_doses.csv",
                std::slice::from_ref(&tables.vaccination.dose_breakdown),
            )?;

            info!(out_dir, "All tables exported");
        }
    }

    Ok(())
}

fn write_table<T: serde::Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<()> {
    let path = dir.join(name);
    output::write_table_csv(&path.to_string_lossy(), rows)
}
