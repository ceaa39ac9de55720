//! Common types and traits for device simulation components.

use crate::sim::clock::Tick;

/// Contextual information passed to devices during power calculations.
/// # Fields
/// * `elapsed_min` - Minutes since the start of the run
/// * `day_minute` - Minutes since midnight of the first simulated day, not
///   wrapped at 24:00
#[derive(Debug, Clone, Copy)]
pub struct DeviceContext {
    pub elapsed_min: usize,
    pub day_minute: usize,
}

impl DeviceContext {
    /// Creates a new DeviceContext for the given step.
    pub fn new(elapsed_min: usize, day_minute: usize) -> Self {
        Self {
            elapsed_min,
            day_minute,
        }
    }
}

impl From<Tick> for DeviceContext {
    fn from(tick: Tick) -> Self {
        Self::new(tick.elapsed_min, tick.day_minute)
    }
}

/// Trait defining a device that produces electricity.
///
/// The engine only needs instantaneous power per step, so anything that can
/// answer that (the stochastic PV model, or a fixed profile in tests) plugs
/// in here.
pub trait Device {
    /// Returns the power output in kW at the given step, always `>= 0`.
    fn power_kw(&mut self, context: &DeviceContext) -> f64;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;
}
