//! Device simulation components for power system modeling.

/// Solar photovoltaic generation model.
pub mod solar;
pub mod types;

// Re-export the main types for convenience
pub use solar::{SolarPv, Weather};
pub use types::Device;
pub use types::DeviceContext;
