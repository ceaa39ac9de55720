//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, StateResponse, TelemetryQuery, TotalsRecord};
use crate::sim::types::StepResult;

/// Returns the run configuration, both strategies' totals, and the last step.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let outcome = &state.outcome;
    Json(StateResponse {
        config: outcome.config.clone(),
        interval: TotalsRecord::from(&outcome.interval),
        realtime: TotalsRecord::from(&outcome.realtime),
        savings: outcome.savings(),
        latest_step: outcome.steps.last().cloned(),
    })
}

/// Returns per-minute results, optionally filtered by elapsed minute.
///
/// `GET /telemetry` → 200 + `Vec<StepResult>` JSON
/// `GET /telemetry?from=N&to=M` → filtered range (inclusive)
/// `GET /telemetry?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TelemetryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<StepResult> = state
        .outcome
        .steps
        .iter()
        .filter(|r| (from..=to).contains(&r.elapsed_min))
        .cloned()
        .collect();

    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::devices::Weather;
    use crate::sim::accounting::{Prices, StrategyTotals};
    use crate::sim::clock::ClockTime;
    use crate::sim::types::{SimConfig, SimulationOutcome};

    fn make_test_state(minutes: usize) -> Arc<AppState> {
        let config = SimConfig::new(
            Weather::Clear,
            Prices {
                export_per_kwh: 0.05,
                local_solar_per_kwh: 0.1,
                import_per_kwh: 0.3,
            },
            ClockTime::new(12, 0).unwrap(),
            1,
            15,
            Some(42),
        )
        .unwrap();
        let steps = (0..minutes)
            .map(|t| StepResult {
                elapsed_min: t,
                timestamp: config.start_time().plus_minutes(t),
                solar_kw: 9.0,
                interval_charge_kw: 9.5,
                realtime_charge_kw: 9.0,
                interval_grid_kw: -0.5,
                realtime_grid_kw: 0.0,
            })
            .collect();
        Arc::new(AppState {
            outcome: SimulationOutcome {
                config,
                steps,
                interval: StrategyTotals::default(),
                realtime: StrategyTotals::default(),
            },
        })
    }

    async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = router(state).oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn state_returns_200() {
        let (status, json) = get_json(make_test_state(60), "/state").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("config").is_some());
        assert!(json.get("interval").is_some());
        assert!(json.get("realtime").is_some());
        assert_eq!(json["latest_step"]["elapsed_min"], 59);
    }

    #[tokio::test]
    async fn state_of_empty_run_has_no_latest_step() {
        let (status, json) = get_json(make_test_state(0), "/state").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["latest_step"].is_null());
    }

    #[tokio::test]
    async fn telemetry_returns_all_steps() {
        let (status, json) = get_json(make_test_state(60), "/telemetry").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(60));
    }

    #[tokio::test]
    async fn telemetry_range_query() {
        let (status, json) = get_json(make_test_state(60), "/telemetry?from=5&to=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(6));
        assert_eq!(json[0]["elapsed_min"], 5);
        assert_eq!(json[0]["timestamp"], "12:05");
        assert_eq!(json[5]["elapsed_min"], 10);
    }

    #[tokio::test]
    async fn telemetry_invalid_range_returns_400() {
        let (status, json) = get_json(make_test_state(60), "/telemetry?from=10&to=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
