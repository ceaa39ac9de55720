//! Weather-dependent solar production model.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::devices::types::{Device, DeviceContext};
use crate::error::ConfigError;

/// Peak output of the array at solar noon on a clear day (kW).
pub const PEAK_KW: f64 = 10.0;
/// Hour at which production starts.
pub const SUNRISE_HOUR: f64 = 6.0;
/// Hour after which production stops.
pub const SUNSET_HOUR: f64 = 18.0;

/// Chance per call that a cloudy sky opens up.
const CLOUD_BREAK_PROBABILITY: f64 = 0.1;

/// Qualitative sky condition for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weather {
    Clear,
    PartlyCloudy,
    Cloudy,
}

impl Weather {
    pub const ALL: [Self; 3] = [Self::Clear, Self::PartlyCloudy, Self::Cloudy];

    /// Multiplier applied to the clear-sky curve.
    pub fn scale(self) -> f64 {
        match self {
            Self::Clear => 1.0,
            Self::PartlyCloudy => 0.7,
            Self::Cloudy => 0.4,
        }
    }

    /// Largest volatility multiplier this weather can draw.
    pub fn max_volatility(self) -> f64 {
        match self {
            Self::Clear => 1.05,
            Self::PartlyCloudy => 1.4,
            // base < 0.6, cloud break < 1.2, periodic term <= 1.0
            Self::Cloudy => 0.6 * 1.2,
        }
    }

    /// Upper bound on [`produce`] output for this weather (kW).
    pub fn max_production_kw(self) -> f64 {
        PEAK_KW * self.scale() * self.max_volatility()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clear" => Ok(Self::Clear),
            "partly-cloudy" => Ok(Self::PartlyCloudy),
            "cloudy" => Ok(Self::Cloudy),
            other => Err(ConfigError::new(
                "weather",
                format!("unknown weather \"{other}\" (expected clear, partly-cloudy or cloudy)"),
            )),
        }
    }
}

/// Deterministic clear-sky output: a half-sine between sunrise and sunset.
///
/// `day_minute` counts from midnight of the first day and is not wrapped, so
/// the sun rises once per run: anything past 24:00 is dark.
/// Returns 0.0 outside 06:00..=18:00.
pub fn base_production_kw(day_minute: usize) -> f64 {
    let exact_hour = day_minute as f64 / 60.0;
    if !(SUNRISE_HOUR..=SUNSET_HOUR).contains(&exact_hour) {
        return 0.0;
    }
    let normalized = (exact_hour - SUNRISE_HOUR) / (SUNSET_HOUR - SUNRISE_HOUR);
    (normalized * PI).sin() * PEAK_KW
}

/// Samples the weather volatility multiplier.
///
/// `minute` is the minute-of-hour, which drives the periodic term of the
/// cloudy model.
pub fn volatility<R: Rng>(weather: Weather, minute: u8, rng: &mut R) -> f64 {
    match weather {
        Weather::Clear => rng.random_range(0.95..1.05),
        Weather::PartlyCloudy => rng.random_range(0.6..1.4),
        Weather::Cloudy => {
            let base = rng.random_range(0.2..0.6);
            let cloud_break = if rng.random_bool(CLOUD_BREAK_PROBABILITY) {
                rng.random_range(0.8..1.2)
            } else {
                1.0
            };
            let periodic = (f64::from(minute) * 0.1).sin() * 0.2 + 0.8;
            base * cloud_break * periodic
        }
    }
}

/// Instantaneous solar output (kW) at `day_minute` under `weather`.
///
/// Draws fresh volatility from `rng` on every daylight call; at night no
/// randomness is consumed.
pub fn produce<R: Rng>(day_minute: usize, weather: Weather, rng: &mut R) -> f64 {
    let base = base_production_kw(day_minute);
    if base <= 0.0 {
        return 0.0;
    }
    let minute_of_hour = (day_minute % 60) as u8;
    (base * weather.scale() * volatility(weather, minute_of_hour, rng)).max(0.0)
}

/// A solar PV array whose output follows [`produce`] for a fixed weather.
///
/// Owns its random source so runs can be made reproducible by seeding it,
/// while remaining non-deterministic by default.
#[derive(Debug, Clone)]
pub struct SolarPv<R = StdRng> {
    /// Sky condition for the whole run.
    pub weather: Weather,
    rng: R,
}

impl<R: Rng> SolarPv<R> {
    /// Creates an array drawing volatility from `rng`.
    pub fn new(weather: Weather, rng: R) -> Self {
        Self { weather, rng }
    }
}

impl SolarPv<StdRng> {
    /// Creates an array with a reproducible random source.
    pub fn seeded(weather: Weather, seed: u64) -> Self {
        Self::new(weather, StdRng::seed_from_u64(seed))
    }

    /// Creates an array seeded from operating-system entropy.
    pub fn from_os_rng(weather: Weather) -> Self {
        Self::new(weather, StdRng::from_os_rng())
    }

    /// Seeded when `seed` is given, entropy-backed otherwise.
    pub fn with_optional_seed(weather: Weather, seed: Option<u64>) -> Self {
        seed.map_or_else(|| Self::from_os_rng(weather), |s| Self::seeded(weather, s))
    }
}

impl<R: Rng> Device for SolarPv<R> {
    fn power_kw(&mut self, context: &DeviceContext) -> f64 {
        produce(context.day_minute, self.weather, &mut self.rng)
    }

    fn device_type(&self) -> &'static str {
        "SolarPV"
    }
}
