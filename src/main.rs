//! Solar charging simulator entry point: CLI wiring, scenario loading, and
//! result output.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use solar_charge_sim::config::ScenarioConfig;
use solar_charge_sim::io::export::{export_csv, export_json};
use solar_charge_sim::sim::engine::simulate;

use cli::Args;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the scenario: `--scenario` takes priority, then `--preset`, then
/// the baseline default.
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    if let Some(path) = &args.scenario {
        return ScenarioConfig::from_toml_file(path)
            .with_context(|| format!("loading scenario {}", path.display()));
    }
    match &args.preset {
        Some(name) => Ok(ScenarioConfig::from_preset(name)?),
        None => Ok(ScenarioConfig::baseline()),
    }
}

fn run(args: Args) -> Result<()> {
    let mut scenario = load_scenario(&args)?;

    if let Some(seed) = args.seed {
        scenario.simulation.seed = Some(seed);
    }
    if let Some(weather) = args.weather {
        scenario.simulation.weather = weather.to_string();
    }

    let config = scenario.to_sim_config()?;

    #[cfg(feature = "tui")]
    if args.tui {
        let name = args.preset.clone().unwrap_or_else(|| "custom".to_string());
        let app = solar_charge_sim::tui::runtime::App::with_config(name, config);
        return solar_charge_sim::tui::run(app).context("terminal UI failed");
    }

    let outcome = simulate(&config);

    if !args.quiet {
        for step in &outcome.steps {
            println!("{step}");
        }
        println!();
    }
    println!("{outcome}");

    if let Some(path) = &args.telemetry_out {
        export_csv(&outcome.steps, path)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        info!(path = %path.display(), "telemetry written");
    }
    if let Some(path) = &args.json_out {
        export_json(&outcome, path)
            .with_context(|| format!("writing JSON to {}", path.display()))?;
        info!(path = %path.display(), "outcome written");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_charge_sim::api::AppState { outcome });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
        rt.block_on(solar_charge_sim::api::serve(state, addr))
            .context("API server failed")?;
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
