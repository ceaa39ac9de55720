//! Wall-clock time of day and the minute-stepped simulation clock.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ConfigError;

const MINUTES_PER_HOUR: usize = 60;
const MINUTES_PER_DAY: usize = 24 * MINUTES_PER_HOUR;

/// A time of day with minute resolution.
///
/// Arithmetic carries minutes into hours and wraps at midnight, so a run
/// started at 00:45 labels its 16th minute `01:00` rather than `00:60`.
///
/// # Examples
///
/// ```
/// use solar_charge_sim::sim::clock::ClockTime;
///
/// let start: ClockTime = "23:45".parse().unwrap();
/// assert_eq!(start.plus_minutes(30).to_string(), "00:15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a time of day, rejecting hours above 23 and minutes above 59.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ConfigError> {
        if hour > 23 {
            return Err(ConfigError::new("start_time", format!("hour {hour} is not in 0..=23")));
        }
        if minute > 59 {
            return Err(ConfigError::new(
                "start_time",
                format!("minute {minute} is not in 0..=59"),
            ));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    pub fn minute_of_day(self) -> usize {
        usize::from(self.hour) * MINUTES_PER_HOUR + usize::from(self.minute)
    }

    /// Fractional hour of day, e.g. 14:30 is `14.5`.
    pub fn decimal_hour(self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0
    }

    /// Returns the time `minutes` later, wrapping past midnight.
    pub fn plus_minutes(self, minutes: usize) -> Self {
        let total = (self.minute_of_day() + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY;
        Self {
            hour: (total / MINUTES_PER_HOUR) as u8,
            minute: (total % MINUTES_PER_HOUR) as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed =
            || ConfigError::new("start_time", format!("\"{s}\" is not a HH:MM time"));
        let (h, m) = s.trim().split_once(':').ok_or_else(malformed)?;
        let hour = h.parse::<u8>().map_err(|_| malformed())?;
        let minute = m.parse::<u8>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One tick of the simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Minutes since the start of the run.
    pub elapsed_min: usize,
    /// Minutes since midnight of the first day. Keeps counting past 24:00.
    pub day_minute: usize,
    /// Wall-clock time at this tick.
    pub time: ClockTime,
}

/// A simulation clock that counts a fixed number of one-minute steps from a
/// start time.
///
/// # Examples
///
/// ```
/// use solar_charge_sim::sim::clock::{Clock, ClockTime};
///
/// let mut clock = Clock::new(ClockTime::new(6, 58).unwrap(), 3);
/// let mut labels = Vec::new();
///
/// clock.run(|tick| labels.push(tick.time.to_string()));
/// assert_eq!(labels, vec!["06:58", "06:59", "07:00"]);
/// ```
pub struct Clock {
    start: ClockTime,
    /// Current step of the simulation
    current: usize,
    /// Total steps to run in the simulation
    total: usize,
}

impl Clock {
    /// Creates a clock that ticks `total` minutes starting at `start`.
    pub fn new(start: ClockTime, total: usize) -> Self {
        Self {
            start,
            current: 0,
            total,
        }
    }

    /// Advances the clock by one minute.
    ///
    /// # Returns
    ///
    /// * `Some(tick)` - The tick for the current minute, before advancing
    /// * `None` - If the clock has reached its total steps
    pub fn tick(&mut self) -> Option<Tick> {
        if self.current < self.total {
            let elapsed_min = self.current;
            self.current += 1;
            Some(Tick {
                elapsed_min,
                day_minute: self.start.minute_of_day() + elapsed_min,
                time: self.start.plus_minutes(elapsed_min),
            })
        } else {
            None
        }
    }

    /// Runs a function for each remaining tick.
    pub fn run(&mut self, mut f: impl FnMut(Tick)) {
        while let Some(tick) = self.tick() {
            f(tick);
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_zero_padded() {
        let t: ClockTime = "7:05".parse().unwrap();
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.to_string(), "07:05");
    }

    #[test]
    fn rejects_out_of_range_and_malformed() {
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert!("12-30".parse::<ClockTime>().is_err());
        assert!("-1:30".parse::<ClockTime>().is_err());
    }

    #[test]
    fn minutes_carry_into_hours() {
        let start = ClockTime::new(0, 45).unwrap();
        assert_eq!(start.plus_minutes(15), ClockTime::new(1, 0).unwrap());
        assert_eq!(start.plus_minutes(61), ClockTime::new(1, 46).unwrap());
    }

    #[test]
    fn wraps_past_midnight() {
        let start = ClockTime::new(22, 30).unwrap();
        assert_eq!(start.plus_minutes(120), ClockTime::new(0, 30).unwrap());
        assert_eq!(start.plus_minutes(24 * 60), start);
    }

    #[test]
    fn decimal_hour() {
        assert_eq!(ClockTime::new(14, 30).unwrap().decimal_hour(), 14.5);
        assert_eq!(ClockTime::MIDNIGHT.decimal_hour(), 0.0);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&ClockTime::new(9, 7).unwrap()).unwrap();
        assert_eq!(json, "\"09:07\"");
    }

    #[test]
    fn clock_ticks_elapsed_and_time() {
        let mut clock = Clock::new(ClockTime::new(10, 0).unwrap(), 2);
        assert_eq!(
            clock.tick(),
            Some(Tick {
                elapsed_min: 0,
                day_minute: 600,
                time: ClockTime::new(10, 0).unwrap()
            })
        );
        assert_eq!(clock.tick().map(|t| t.elapsed_min), Some(1));
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn day_minute_keeps_counting_past_midnight() {
        let mut clock = Clock::new(ClockTime::new(23, 59).unwrap(), 2);
        let first = clock.tick().unwrap();
        let second = clock.tick().unwrap();
        assert_eq!(first.day_minute, 1439);
        assert_eq!(second.day_minute, 1440);
        assert_eq!(second.time, ClockTime::MIDNIGHT);
    }

    #[test]
    fn empty_clock_never_calls() {
        let mut clock = Clock::new(ClockTime::MIDNIGHT, 0);
        let mut was_called = false;
        clock.run(|_| was_called = true);
        assert!(!was_called);
    }
}
