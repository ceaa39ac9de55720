//! Simulation engine that drives the solar model and both charging
//! controllers minute by minute.

use tracing::info;

use crate::devices::{Device, DeviceContext, SolarPv};

use super::accounting::{StrategyTotals, grid_power_kw};
use super::clock::{Clock, Tick};
use super::controller::{Controller, IntervalController, RealtimeController};
use super::types::{SimConfig, SimulationOutcome, StepResult};

/// Simulation engine owning the solar source, both controllers, and their
/// running totals.
///
/// Generic over the production device so tests can substitute a fixed
/// profile for the stochastic PV model.
pub struct Engine<S: Device> {
    config: SimConfig,
    solar: S,
    interval: IntervalController,
    realtime: RealtimeController,
    interval_totals: StrategyTotals,
    realtime_totals: StrategyTotals,
}

impl Engine<SolarPv> {
    /// Builds an engine around the weather-driven PV model, seeded from
    /// `config.seed()` when present.
    pub fn from_config(config: SimConfig) -> Self {
        let solar = SolarPv::with_optional_seed(config.weather(), config.seed());
        Self::new(config, solar)
    }
}

impl<S: Device> Engine<S> {
    pub fn new(config: SimConfig, solar: S) -> Self {
        let interval = IntervalController::new(config.control_interval_min());
        Self {
            config,
            solar,
            interval,
            realtime: RealtimeController,
            interval_totals: StrategyTotals::default(),
            realtime_totals: StrategyTotals::default(),
        }
    }

    /// Executes one simulated minute and books it into both totals.
    ///
    /// Ticks must be fed in order starting from `elapsed_min == 0`; the
    /// interval controller carries its rate across calls.
    pub fn step(&mut self, tick: Tick) -> StepResult {
        let solar_kw = self.solar.power_kw(&DeviceContext::from(tick));

        let interval_charge_kw = self.interval.charge_rate_kw(tick.elapsed_min, solar_kw);
        let realtime_charge_kw = self.realtime.charge_rate_kw(tick.elapsed_min, solar_kw);

        let prices = self.config.prices();
        let dt = self.config.energy_step_h();
        self.interval_totals.record(solar_kw, interval_charge_kw, &prices, dt);
        self.realtime_totals.record(solar_kw, realtime_charge_kw, &prices, dt);

        StepResult {
            elapsed_min: tick.elapsed_min,
            timestamp: tick.time,
            solar_kw,
            interval_charge_kw,
            realtime_charge_kw,
            interval_grid_kw: grid_power_kw(solar_kw, interval_charge_kw),
            realtime_grid_kw: grid_power_kw(solar_kw, realtime_charge_kw),
        }
    }

    /// Clock for a full run of this engine's configuration.
    pub fn clock(&self) -> Clock {
        Clock::new(self.config.start_time(), self.config.total_steps())
    }

    /// Executes every minute of the configured duration and returns the
    /// series together with both strategies' totals.
    pub fn run(mut self) -> SimulationOutcome {
        info!(
            weather = %self.config.weather(),
            start = %self.config.start_time(),
            duration_hours = self.config.duration_hours(),
            control_interval_min = self.config.control_interval_min().get(),
            solar = self.solar.device_type(),
            "starting simulation"
        );

        let mut clock = self.clock();
        let mut steps = Vec::with_capacity(clock.total());
        clock.run(|tick| steps.push(self.step(tick)));

        info!(
            steps = steps.len(),
            interval_cost = self.interval_totals.total_cost(),
            realtime_cost = self.realtime_totals.total_cost(),
            "simulation finished"
        );

        SimulationOutcome {
            config: self.config,
            steps,
            interval: self.interval_totals,
            realtime: self.realtime_totals,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Running totals of the interval strategy.
    pub fn interval_totals(&self) -> &StrategyTotals {
        &self.interval_totals
    }

    /// Running totals of the real-time strategy.
    pub fn realtime_totals(&self) -> &StrategyTotals {
        &self.realtime_totals
    }
}

/// Runs a full simulation for `config` with the weather-driven PV model.
///
/// # Examples
///
/// ```
/// use solar_charge_sim::config::ScenarioConfig;
/// use solar_charge_sim::sim::engine::simulate;
///
/// let config = ScenarioConfig::baseline().to_sim_config().unwrap();
/// let outcome = simulate(&config);
/// assert_eq!(outcome.steps.len(), config.total_steps());
/// ```
pub fn simulate(config: &SimConfig) -> SimulationOutcome {
    Engine::from_config(config.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::Weather;
    use crate::sim::accounting::Prices;
    use crate::sim::clock::ClockTime;
    use approx::assert_relative_eq;

    /// Constant output regardless of time.
    struct Constant(f64);

    impl Device for Constant {
        fn power_kw(&mut self, _context: &DeviceContext) -> f64 {
            self.0
        }

        fn device_type(&self) -> &'static str {
            "Constant"
        }
    }

    fn config(duration_hours: usize, interval: usize) -> SimConfig {
        SimConfig::new(
            Weather::Clear,
            Prices {
                export_per_kwh: 0.05,
                local_solar_per_kwh: 0.10,
                import_per_kwh: 0.30,
            },
            ClockTime::new(8, 0).unwrap(),
            duration_hours,
            interval,
            Some(42),
        )
        .unwrap()
    }

    #[test]
    fn run_produces_one_step_per_minute() {
        let outcome = Engine::new(config(2, 15), Constant(3.0)).run();
        assert_eq!(outcome.steps.len(), 120);
        assert_eq!(outcome.steps[0].timestamp.to_string(), "08:00");
        assert_eq!(outcome.steps[119].timestamp.to_string(), "09:59");
    }

    #[test]
    fn constant_sun_charges_everything_from_solar() {
        let outcome = Engine::new(config(1, 15), Constant(6.0)).run();
        for totals in [&outcome.interval, &outcome.realtime] {
            assert_relative_eq!(totals.total_charged_kwh, 6.0, epsilon = 1e-9);
            assert_relative_eq!(totals.total_solar_energy_kwh, 6.0, epsilon = 1e-9);
            assert_eq!(totals.total_grid_energy_kwh, 0.0);
            assert_eq!(totals.export_earnings, 0.0);
        }
    }

    #[test]
    fn surplus_above_max_rate_is_exported() {
        let outcome = Engine::new(config(1, 15), Constant(13.0)).run();
        let step = &outcome.steps[0];
        assert_eq!(step.realtime_charge_kw, 11.0);
        assert_relative_eq!(step.realtime_grid_kw, 2.0);
        assert_relative_eq!(outcome.realtime.exported_energy_kwh, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn engine_exposes_running_totals() {
        let mut engine = Engine::new(config(1, 5), Constant(4.0));
        let mut clock = engine.clock();
        let first = clock.tick().unwrap();
        engine.step(first);
        assert_relative_eq!(engine.interval_totals().total_charged_kwh, 4.0 / 60.0);
        assert_relative_eq!(engine.realtime_totals().total_charged_kwh, 4.0 / 60.0);
        assert_eq!(engine.config().control_interval_min().get(), 5);
    }

    #[test]
    fn zero_duration_yields_empty_outcome() {
        let outcome = Engine::new(config(0, 15), Constant(5.0)).run();
        assert!(outcome.steps.is_empty());
        assert_eq!(outcome.interval, StrategyTotals::default());
        assert_eq!(outcome.realtime.effective_cost_per_kwh(), 0.0);
    }
}
