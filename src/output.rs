//! Output formatting and persistence for derived tables.
//!
//! Supports pretty-printed JSON on stdout and whole-table CSV files.
//! Undefined rates serialize as JSON `null` / empty CSV cells.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

/// Writes a value as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Writes a derived table to a CSV file, headers included, replacing any
/// existing file.
pub fn write_table_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path, rows = rows.len(), "Summary table written");
    Ok(())
}
