//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_charge_sim::api::{AppState, router};
use solar_charge_sim::config::ScenarioConfig;
use solar_charge_sim::sim::engine::simulate;

/// Runs the seeded baseline preset and wraps it as API state.
fn build_api_state() -> Arc<AppState> {
    let mut scenario = ScenarioConfig::baseline();
    scenario.simulation.seed = Some(42);
    let config = scenario.to_sim_config().unwrap();
    Arc::new(AppState {
        outcome: simulate(&config),
    })
}

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn state_reports_both_strategies() {
    let state = build_api_state();
    let expected_savings = state.outcome.savings();
    let (status, json) = get(state, "/state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["config"]["weather"], "clear");
    assert_eq!(json["config"]["start_time"], "06:00");
    for strategy in ["interval", "realtime"] {
        for key in [
            "total_solar_energy_kwh",
            "total_grid_energy_kwh",
            "total_charged_kwh",
            "exported_energy_kwh",
            "solar_cost",
            "grid_cost",
            "export_earnings",
            "total_cost",
            "effective_cost_per_kwh",
        ] {
            assert!(json[strategy].get(key).is_some(), "missing {strategy}.{key}");
        }
    }
    assert_eq!(json["realtime"]["grid_cost"], 0.0);
    assert_eq!(json["savings"].as_f64(), Some(expected_savings));
    assert_eq!(json["latest_step"]["elapsed_min"], 719);
    assert_eq!(json["latest_step"]["timestamp"], "17:59");
}

#[tokio::test]
async fn telemetry_range_is_inclusive() {
    let (status, json) = get(build_api_state(), "/telemetry?from=60&to=74").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 15);
    assert_eq!(rows[0]["elapsed_min"], 60);
    assert_eq!(rows[0]["timestamp"], "07:00");
    assert_eq!(rows[14]["elapsed_min"], 74);
}

#[tokio::test]
async fn telemetry_defaults_to_whole_run() {
    let (status, json) = get(build_api_state(), "/telemetry").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 720);
}

#[tokio::test]
async fn telemetry_rejects_inverted_range() {
    let (status, json) = get(build_api_state(), "/telemetry?from=10&to=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("from"));
}
