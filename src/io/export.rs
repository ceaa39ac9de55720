//! CSV and JSON export for simulation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::{SimulationOutcome, StepResult};

/// Column header for the per-minute CSV export.
const HEADER: &str = "elapsed_min,time,solar_kw,interval_charge_kw,interval_grid_kw,\
                       realtime_charge_kw,realtime_grid_kw";

/// Exports step results to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes step results as CSV to any writer, one row per simulated minute.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            r.elapsed_min.to_string(),
            r.timestamp.to_string(),
            format!("{:.4}", r.solar_kw),
            format!("{:.4}", r.interval_charge_kw),
            format!("{:.4}", r.interval_grid_kw),
            format!("{:.4}", r.realtime_charge_kw),
            format!("{:.4}", r.realtime_grid_kw),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the full outcome (config, steps, totals) as pretty JSON.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_json(outcome: &SimulationOutcome, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    write_json(outcome, &mut buf)?;
    buf.flush()
}

/// Writes the full outcome as pretty JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(outcome: &SimulationOutcome, writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, outcome).map_err(io::Error::other)
}
