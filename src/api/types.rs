//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::accounting::StrategyTotals;
use crate::sim::types::{SimConfig, StepResult};

/// Combined state response.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub config: SimConfig,
    pub interval: TotalsRecord,
    pub realtime: TotalsRecord,
    /// Real-time savings over the interval strategy.
    pub savings: f64,
    /// Last simulated minute, absent for an empty run.
    pub latest_step: Option<StepResult>,
}

/// Strategy totals plus the derived cost figures.
#[derive(Debug, Serialize)]
pub struct TotalsRecord {
    #[serde(flatten)]
    pub totals: StrategyTotals,
    pub total_cost: f64,
    pub effective_cost_per_kwh: f64,
}

impl From<&StrategyTotals> for TotalsRecord {
    fn from(t: &StrategyTotals) -> Self {
        Self {
            totals: t.clone(),
            total_cost: t.total_cost(),
            effective_cost_per_kwh: t.effective_cost_per_kwh(),
        }
    }
}

/// Optional range query parameters for the telemetry endpoint.
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// Start minute (inclusive).
    pub from: Option<usize>,
    /// End minute (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
