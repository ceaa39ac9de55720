//! Minute-resolution simulator comparing an interval charging controller and
//! a real-time charging controller for an EV fed by rooftop solar.

/// REST API over a finished run.
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
pub mod error;
pub mod io;
/// Simulation engine, clock, controllers, and accounting.
pub mod sim;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{ConfigError, SimError};
