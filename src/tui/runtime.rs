//! Simulation runner and TUI application state.

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::devices::SolarPv;
use crate::error::SimError;
use crate::sim::accounting::StrategyTotals;
use crate::sim::clock::Clock;
use crate::sim::engine::Engine;
use crate::sim::types::{SimConfig, StepResult};

/// Maximum number of minutes kept for the rolling chart.
const MAX_HISTORY: usize = 240;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [200, 100, 50, 20, 5, 1];

/// Default speed index (20 ms).
const DEFAULT_SPEED_IDX: usize = 3;

/// TUI application state.
pub struct App {
    engine: Engine<SolarPv>,
    clock: Clock,
    /// Rolling history of step results for the chart.
    pub history: VecDeque<StepResult>,
    /// Minutes executed so far.
    pub elapsed: usize,
    /// Total minutes in the run.
    pub total_steps: usize,
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    pub quit: bool,
    /// When the last simulation tick was executed.
    pub last_tick: Instant,
    /// Name of the active preset.
    pub preset_name: String,
}

impl App {
    /// Creates a new app from a built-in preset.
    pub fn new(preset: &str) -> Result<Self, SimError> {
        let (name, config) = Self::load(preset)?;
        Ok(Self::with_config(name, config))
    }

    /// Creates an app for an already validated configuration.
    pub fn with_config(name: String, config: SimConfig) -> Self {
        let engine = Engine::from_config(config);
        let clock = engine.clock();
        let total_steps = clock.total();
        Self {
            engine,
            clock,
            history: VecDeque::with_capacity(MAX_HISTORY),
            elapsed: 0,
            total_steps,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            preset_name: name,
        }
    }

    fn load(preset: &str) -> Result<(String, SimConfig), SimError> {
        let config = ScenarioConfig::from_preset(preset)?.to_sim_config()?;
        Ok((preset.to_string(), config))
    }

    /// Advances the simulation by one minute if not finished.
    pub fn tick(&mut self) {
        let Some(tick) = self.clock.tick() else {
            return;
        };
        let result = self.engine.step(tick);
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(result);
        self.elapsed += 1;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases simulation speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases simulation speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    /// Switches to a different preset, resetting simulation state.
    /// Unknown names leave the current run untouched.
    pub fn switch_preset(&mut self, name: &str) {
        if let Ok((name, config)) = Self::load(name) {
            *self = Self {
                speed_idx: self.speed_idx,
                ..Self::with_config(name, config)
            };
        }
    }

    /// Restarts the current run from the beginning with the same
    /// configuration. A seeded run replays its weather; an unseeded one
    /// draws new weather.
    pub fn restart(&mut self) {
        let config = self.engine.config().clone();
        let name = std::mem::take(&mut self.preset_name);
        *self = Self {
            speed_idx: self.speed_idx,
            ..Self::with_config(name, config)
        };
    }

    pub fn config(&self) -> &SimConfig {
        self.engine.config()
    }

    pub fn interval_totals(&self) -> &StrategyTotals {
        self.engine.interval_totals()
    }

    pub fn realtime_totals(&self) -> &StrategyTotals {
        self.engine.realtime_totals()
    }

    /// Returns `true` when every minute has been executed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_steps
    }

    /// Returns the most recent step result, if any.
    pub fn last_result(&self) -> Option<&StepResult> {
        self.history.back()
    }
}
