//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_charge_sim::devices::{Device, DeviceContext, Weather};
use solar_charge_sim::sim::accounting::Prices;
use solar_charge_sim::sim::clock::ClockTime;
use solar_charge_sim::sim::types::SimConfig;

/// Default tariffs (export 0.05, local solar 0.10, import 0.30).
pub fn default_prices() -> Prices {
    Prices {
        export_per_kwh: 0.05,
        local_solar_per_kwh: 0.10,
        import_per_kwh: 0.30,
    }
}

/// Validated configuration with default prices and a fixed seed.
pub fn config(
    weather: Weather,
    start: (u8, u8),
    duration_hours: usize,
    control_interval_min: usize,
) -> SimConfig {
    SimConfig::new(
        weather,
        default_prices(),
        ClockTime::new(start.0, start.1).unwrap(),
        duration_hours,
        control_interval_min,
        Some(42),
    )
    .unwrap()
}

/// Solar source replaying a fixed per-minute profile, indexed by elapsed
/// minute. Minutes past the end of the profile produce nothing.
pub struct Profile(pub Vec<f64>);

impl Profile {
    /// Profile built by evaluating `f` for each elapsed minute.
    pub fn from_fn(minutes: usize, f: impl Fn(usize) -> f64) -> Self {
        Self((0..minutes).map(f).collect())
    }
}

impl Device for Profile {
    fn power_kw(&mut self, context: &DeviceContext) -> f64 {
        self.0.get(context.elapsed_min).copied().unwrap_or(0.0)
    }

    fn device_type(&self) -> &'static str {
        "Profile"
    }
}
