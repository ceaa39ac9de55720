//! Charging controllers that turn available solar power into a charge rate.

use std::num::NonZeroUsize;

use tracing::debug;

/// Maximum charging rate of the vehicle (kW).
pub const MAX_CHARGE_RATE_KW: f64 = 11.0;

/// Controller contract: decide the charging rate for one step.
pub trait Controller {
    /// Returns the charging rate (kW) for step `elapsed_min`, in
    /// `[0, MAX_CHARGE_RATE_KW]`.
    fn charge_rate_kw(&mut self, elapsed_min: usize, solar_kw: f64) -> f64;

    /// Short label used in reports.
    fn name(&self) -> &'static str;
}

/// Follow the sun: charge at whatever solar is available, capped at the
/// vehicle limit, or not at all at night.
fn solar_following_rate(solar_kw: f64) -> f64 {
    if solar_kw > 0.0 {
        solar_kw.min(MAX_CHARGE_RATE_KW)
    } else {
        0.0
    }
}

/// Periodic controller.
///
/// Re-evaluates only every `interval_min` minutes counted from the start of
/// the run and holds its previous rate in between. Because the held rate can
/// exceed what the sun provides a few minutes later, the shortfall is drawn
/// from the grid.
#[derive(Debug, Clone)]
pub struct IntervalController {
    interval_min: NonZeroUsize,
    current_kw: f64,
}

impl IntervalController {
    pub fn new(interval_min: NonZeroUsize) -> Self {
        Self {
            interval_min,
            current_kw: 0.0,
        }
    }

    pub fn interval_min(&self) -> NonZeroUsize {
        self.interval_min
    }

    /// Returns `true` when the controller re-evaluates at this step.
    pub fn is_control_point(&self, elapsed_min: usize) -> bool {
        elapsed_min % self.interval_min.get() == 0
    }
}

impl Controller for IntervalController {
    fn charge_rate_kw(&mut self, elapsed_min: usize, solar_kw: f64) -> f64 {
        if self.is_control_point(elapsed_min) {
            let next = solar_following_rate(solar_kw);
            if next != self.current_kw {
                debug!(elapsed_min, from_kw = self.current_kw, to_kw = next, "interval rate change");
            }
            self.current_kw = next;
        }
        self.current_kw
    }

    fn name(&self) -> &'static str {
        "interval"
    }
}

/// Continuous controller.
///
/// Re-evaluates every step and never charges beyond the solar available at
/// that step, so it never imports to charge.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealtimeController;

impl Controller for RealtimeController {
    fn charge_rate_kw(&mut self, _elapsed_min: usize, solar_kw: f64) -> f64 {
        solar_following_rate(solar_kw)
    }

    fn name(&self) -> &'static str {
        "real-time"
    }
}
