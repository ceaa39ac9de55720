//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use solar_charge_sim::devices::Weather;

/// Compare interval and real-time EV charging against a simulated solar day.
///
/// If neither `--scenario` nor `--preset` is given, the baseline preset is used.
#[derive(Debug, Parser)]
#[command(name = "solar-charge-sim", version, about)]
pub struct Args {
    /// Load scenario from a TOML config file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, partly_cloudy, overcast, full_day).
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the random seed for reproducible weather.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the weather (clear, partly-cloudy, cloudy).
    #[arg(long, value_parser = parse_weather)]
    pub weather: Option<Weather>,

    /// Export per-minute results to CSV.
    #[arg(long, value_name = "PATH")]
    pub telemetry_out: Option<PathBuf>,

    /// Export the full outcome (config, steps, totals) to JSON.
    #[arg(long, value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    /// Print only the comparison report, not every minute.
    #[arg(long, short)]
    pub quiet: bool,

    /// Start REST API server after simulation.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Step the simulation live in a terminal UI instead of printing.
    #[cfg(feature = "tui")]
    #[arg(long)]
    pub tui: bool,
}

fn parse_weather(s: &str) -> Result<Weather, String> {
    s.parse().map_err(|e: solar_charge_sim::ConfigError| e.message)
}
