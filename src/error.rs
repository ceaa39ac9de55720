//! Error types for scenario loading, validation, and export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single configuration violation with its dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"prices.import_per_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Crate-level error.
///
/// The simulation loop itself never fails; every variant here is raised at
/// the boundary, before a run starts or after it finishes.
#[derive(Debug, Error)]
pub enum SimError {
    /// One or more configuration values are out of range or unrecognized.
    #[error("invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("unknown preset \"{name}\" (expected one of: {})", crate::config::ScenarioConfig::PRESETS.join(", "))]
    UnknownPreset { name: String },

    #[error("failed to read scenario {}: {source}", .path.display())]
    ReadScenario {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    ParseScenario(#[from] toml::de::Error),

    #[error("failed to export results: {0}")]
    Export(#[from] io::Error),
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(vec![err])
    }
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_field() {
        let err = SimError::InvalidConfig(vec![
            ConfigError::new("prices.import_per_kwh", "must be >= 0"),
            ConfigError::new("simulation.weather", "unknown weather \"foggy\""),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("prices.import_per_kwh"));
        assert!(msg.contains("simulation.weather"));
    }

    #[test]
    fn unknown_preset_names_alternatives() {
        let err = SimError::UnknownPreset {
            name: "sunny".into(),
        };
        assert!(err.to_string().contains("baseline"));
    }
}
