//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::devices::Weather;
use crate::error::{ConfigError, SimError};
use crate::sim::accounting::Prices;
use crate::sim::clock::ClockTime;
use crate::sim::types::{MAX_DURATION_HOURS, SimConfig};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default. Values stay raw
/// (strings for weather and start time) until [`ScenarioConfig::validate`]
/// or [`ScenarioConfig::to_sim_config`] checks them.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Timing, weather, and controller cadence.
    #[serde(default)]
    pub simulation: SimulationSection,
    /// Energy tariffs.
    #[serde(default)]
    pub prices: PriceSection,
}

/// Timing, weather, and controller cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    /// `"clear"`, `"partly-cloudy"` or `"cloudy"`.
    pub weather: String,
    /// Start of the run as `HH:MM`.
    pub start_time: String,
    /// Hours to simulate.
    pub duration_hours: usize,
    /// Minutes between interval-controller decisions (must be > 0).
    pub control_interval_min: usize,
    /// Seed for solar volatility; omit for a fresh random run each time.
    pub seed: Option<u64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            weather: "clear".to_string(),
            start_time: "06:00".to_string(),
            duration_hours: 12,
            control_interval_min: 15,
            seed: None,
        }
    }
}

/// Energy tariffs in currency per kWh.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceSection {
    pub export_per_kwh: f64,
    pub local_solar_per_kwh: f64,
    pub import_per_kwh: f64,
}

impl Default for PriceSection {
    fn default() -> Self {
        Self {
            export_per_kwh: 0.05,
            local_solar_per_kwh: 0.10,
            import_per_kwh: 0.30,
        }
    }
}

impl ScenarioConfig {
    /// Names accepted by [`ScenarioConfig::from_preset`].
    pub const PRESETS: &[&str] = &["baseline", "partly_cloudy", "overcast", "full_day"];

    /// Returns the baseline scenario: a clear day from sunrise to sunset.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationSection::default(),
            prices: PriceSection::default(),
        }
    }

    /// Returns the partly-cloudy preset: same window, broken cloud cover.
    pub fn partly_cloudy() -> Self {
        Self {
            simulation: SimulationSection {
                weather: "partly-cloudy".to_string(),
                ..SimulationSection::default()
            },
            prices: PriceSection::default(),
        }
    }

    /// Returns the overcast preset: heavy cloud, slow controller, pricey grid.
    pub fn overcast() -> Self {
        Self {
            simulation: SimulationSection {
                weather: "cloudy".to_string(),
                control_interval_min: 30,
                ..SimulationSection::default()
            },
            prices: PriceSection {
                import_per_kwh: 0.40,
                ..PriceSection::default()
            },
        }
    }

    /// Returns the full-day preset: midnight to midnight, hourly control.
    pub fn full_day() -> Self {
        Self {
            simulation: SimulationSection {
                start_time: "00:00".to_string(),
                duration_hours: 24,
                control_interval_min: 60,
                ..SimulationSection::default()
            },
            prices: PriceSection::default(),
        }
    }

    /// Looks up a built-in preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownPreset`] if `name` is not in [`Self::PRESETS`].
    pub fn from_preset(name: &str) -> Result<Self, SimError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "partly_cloudy" => Ok(Self::partly_cloudy()),
            "overcast" => Ok(Self::overcast()),
            "full_day" => Ok(Self::full_day()),
            _ => Err(SimError::UnknownPreset {
                name: name.to_string(),
            }),
        }
    }

    /// Parses a scenario from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a scenario TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, SimError> {
        let contents = fs::read_to_string(path).map_err(|source| SimError::ReadScenario {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks every field and returns all violations found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if let Err(e) = s.weather.parse::<Weather>() {
            errors.push(ConfigError::new("simulation.weather", e.message));
        }
        if let Err(e) = s.start_time.parse::<ClockTime>() {
            errors.push(ConfigError::new("simulation.start_time", e.message));
        }
        if s.control_interval_min == 0 {
            errors.push(ConfigError::new("simulation.control_interval_min", "must be > 0"));
        }
        if s.duration_hours > MAX_DURATION_HOURS {
            errors.push(ConfigError::new(
                "simulation.duration_hours",
                format!("must be <= {MAX_DURATION_HOURS}"),
            ));
        }

        let p = &self.prices;
        for (field, value) in [
            ("prices.export_per_kwh", p.export_per_kwh),
            ("prices.local_solar_per_kwh", p.local_solar_per_kwh),
            ("prices.import_per_kwh", p.import_per_kwh),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(field, "must be a finite value >= 0"));
            }
        }

        errors
    }

    /// Validates the scenario and converts it into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] with every violation from
    /// [`Self::validate`].
    pub fn to_sim_config(&self) -> Result<SimConfig, SimError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SimError::InvalidConfig(errors));
        }
        let s = &self.simulation;
        SimConfig::new(
            s.weather.parse()?,
            Prices {
                export_per_kwh: self.prices.export_per_kwh,
                local_solar_per_kwh: self.prices.local_solar_per_kwh,
                import_per_kwh: self.prices.import_per_kwh,
            },
            s.start_time.parse()?,
            s.duration_hours,
            s.control_interval_min,
            s.seed,
        )
    }
}
