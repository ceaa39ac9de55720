//! Core simulation types: validated run configuration, per-minute records,
//! and the outcome of a whole run.

use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;

use super::accounting::{Prices, StrategyTotals};
use super::clock::ClockTime;
use crate::devices::Weather;
use crate::error::{ConfigError, SimError};

/// Length of one simulation step in minutes.
pub const STEP_MINUTES: usize = 1;

/// Longest run accepted, in hours.
pub const MAX_DURATION_HOURS: usize = 7 * 24;

/// Validated configuration for one run.
///
/// Fields are private so every `SimConfig` has passed [`SimConfig::new`];
/// read them through the accessors.
///
/// # Examples
///
/// ```
/// use solar_charge_sim::devices::Weather;
/// use solar_charge_sim::sim::accounting::Prices;
/// use solar_charge_sim::sim::clock::ClockTime;
/// use solar_charge_sim::sim::types::SimConfig;
///
/// let prices = Prices { export_per_kwh: 0.05, local_solar_per_kwh: 0.1, import_per_kwh: 0.3 };
/// let cfg = SimConfig::new(Weather::Clear, prices, ClockTime::new(6, 0).unwrap(), 12, 15, Some(42)).unwrap();
/// assert_eq!(cfg.total_steps(), 720);
/// assert!((cfg.energy_step_h() - 1.0 / 60.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    weather: Weather,
    prices: Prices,
    start_time: ClockTime,
    duration_hours: usize,
    control_interval_min: NonZeroUsize,
    seed: Option<u64>,
}

impl SimConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] listing every price that is
    /// negative or not finite, a zero `control_interval_min`, and a
    /// `duration_hours` above [`MAX_DURATION_HOURS`].
    pub fn new(
        weather: Weather,
        prices: Prices,
        start_time: ClockTime,
        duration_hours: usize,
        control_interval_min: usize,
        seed: Option<u64>,
    ) -> Result<Self, SimError> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("prices.export_per_kwh", prices.export_per_kwh),
            ("prices.local_solar_per_kwh", prices.local_solar_per_kwh),
            ("prices.import_per_kwh", prices.import_per_kwh),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::new(field, "must be a finite value >= 0"));
            }
        }
        if duration_hours > MAX_DURATION_HOURS {
            errors.push(ConfigError::new(
                "simulation.duration_hours",
                format!("must be <= {MAX_DURATION_HOURS}"),
            ));
        }
        let interval = NonZeroUsize::new(control_interval_min);
        if interval.is_none() {
            errors.push(ConfigError::new("simulation.control_interval_min", "must be > 0"));
        }
        match interval {
            Some(control_interval_min) if errors.is_empty() => Ok(Self {
                weather,
                prices,
                start_time,
                duration_hours,
                control_interval_min,
                seed,
            }),
            _ => Err(SimError::InvalidConfig(errors)),
        }
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn prices(&self) -> Prices {
        self.prices
    }

    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    /// Number of hours to simulate.
    pub fn duration_hours(&self) -> usize {
        self.duration_hours
    }

    /// Cadence (minutes) at which the interval controller may change rate.
    pub fn control_interval_min(&self) -> NonZeroUsize {
        self.control_interval_min
    }

    /// Seed for the solar volatility; `None` draws from OS entropy.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Same configuration with a different seed.
    pub fn with_seed(self, seed: Option<u64>) -> Self {
        Self { seed, ..self }
    }

    /// Total number of one-minute steps.
    pub fn total_steps(&self) -> usize {
        self.duration_hours * 60 / STEP_MINUTES
    }

    /// Energy per kW over one step, in hours.
    pub fn energy_step_h(&self) -> f64 {
        STEP_MINUTES as f64 / 60.0
    }
}

/// Complete record of one simulated minute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    /// Minutes since the start of the run.
    pub elapsed_min: usize,
    /// Wall-clock label for this minute.
    pub timestamp: ClockTime,
    /// Solar production (kW, >= 0).
    pub solar_kw: f64,
    /// Interval controller charging rate (kW).
    pub interval_charge_kw: f64,
    /// Real-time controller charging rate (kW).
    pub realtime_charge_kw: f64,
    /// Interval grid power (kW; positive=export, negative=import).
    pub interval_grid_kw: f64,
    /// Real-time grid power (kW; positive=export, negative=import).
    pub realtime_grid_kw: f64,
}

impl StepResult {
    pub fn interval_import_kw(&self) -> f64 {
        (-self.interval_grid_kw).max(0.0)
    }

    pub fn interval_export_kw(&self) -> f64 {
        self.interval_grid_kw.max(0.0)
    }

    pub fn realtime_import_kw(&self) -> f64 {
        (-self.realtime_grid_kw).max(0.0)
    }

    pub fn realtime_export_kw(&self) -> f64 {
        self.realtime_grid_kw.max(0.0)
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>4} ({}) | solar={:>6.2} kW | interval: charge={:>6.2} grid={:>6.2} | \
             real-time: charge={:>6.2} grid={:>6.2}",
            self.elapsed_min,
            self.timestamp,
            self.solar_kw,
            self.interval_charge_kw,
            self.interval_grid_kw,
            self.realtime_charge_kw,
            self.realtime_grid_kw,
        )
    }
}

/// Everything a run produces: the per-minute series and both strategies'
/// totals.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    pub config: SimConfig,
    pub steps: Vec<StepResult>,
    pub interval: StrategyTotals,
    pub realtime: StrategyTotals,
}

impl SimulationOutcome {
    /// How much cheaper the real-time strategy was than the interval one.
    /// Negative when the interval strategy came out ahead.
    pub fn savings(&self) -> f64 {
        self.interval.total_cost() - self.realtime.total_cost()
    }
}

impl fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        writeln!(
            f,
            "--- Charging Comparison ({}, start {}, {} h, interval {} min) ---",
            c.weather, c.start_time, c.duration_hours, c.control_interval_min
        )?;
        writeln!(f, "{:<22}{:>12}{:>12}", "", "interval", "real-time")?;
        let (i, r) = (&self.interval, &self.realtime);
        let rows = [
            ("Solar energy (kWh)", i.total_solar_energy_kwh, r.total_solar_energy_kwh, 2_usize),
            ("Grid energy (kWh)", i.total_grid_energy_kwh, r.total_grid_energy_kwh, 2),
            ("Exported (kWh)", i.exported_energy_kwh, r.exported_energy_kwh, 2),
            ("Total charged (kWh)", i.total_charged_kwh, r.total_charged_kwh, 2),
            ("Solar cost", i.solar_cost, r.solar_cost, 2),
            ("Grid cost", i.grid_cost, r.grid_cost, 2),
            ("Export earnings", i.export_earnings, r.export_earnings, 2),
            ("Total cost", i.total_cost(), r.total_cost(), 2),
            ("Cost per kWh", i.effective_cost_per_kwh(), r.effective_cost_per_kwh(), 3),
        ];
        for (label, interval, realtime, p) in rows {
            writeln!(f, "{label:<22}{interval:>12.p$}{realtime:>12.p$}")?;
        }
        write!(f, "Real-time savings:    {:.2}", self.savings())
    }
}
