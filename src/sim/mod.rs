/// Accounting of energy sources, costs and export earnings per strategy.
pub mod accounting;
/// Wall-clock time and the minute-stepped simulation clock.
pub mod clock;
pub mod controller;
pub mod engine;
pub mod types;
