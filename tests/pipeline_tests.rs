//! End-to-end search tests against mocked Open-Meteo endpoints
//!
//! The HTTP side runs through `ForecastClient` against wiremock; the result
//! is then fed through the store exactly as the effect handler would.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tui_dispatch::testing::*;
use tui_dispatch::EffectStore;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use forecast_chart::{
    action::Action,
    api::{ApiConfig, ForecastClient, ForecastError, NOT_FOUND_MESSAGE},
    effect::{Effect, forecast_completion},
    reducer::reducer,
    state::AppState,
};

fn client_for(server: &MockServer) -> ForecastClient {
    ForecastClient::new(ApiConfig {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        language: "es".into(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

async fn mock_madrid_geocoding(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Madrid"))
        .and(query_param("count", "1"))
        .and(query_param("language", "es"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"latitude": 40.4, "longitude": -3.7, "name": "Madrid", "country": "Spain"}
            ]
        })))
        .mount(server)
        .await;
}

/// Run the effect the reducer asked for, returning the completion action.
async fn run_effect(client: &ForecastClient, effect: &Effect) -> Action {
    let Effect::FetchForecast { seq, city } = effect;
    forecast_completion(*seq, client.fetch_report(city).await)
}

#[tokio::test]
async fn test_madrid_end_to_end() {
    let server = MockServer::start().await;
    mock_madrid_geocoding(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "40.4"))
        .and(query_param("longitude", "-3.7"))
        .and(query_param("hourly", "temperature_2m"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": {"time": ["2024-01-01T00:00"], "temperature_2m": [5]}
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut store = EffectStore::new(AppState::with_query("Madrid"), reducer);
    let result = store.dispatch(Action::SearchSubmit("Madrid".into()));
    assert!(store.state().forecast.is_loading());
    assert_eq!(result.effects.len(), 1);

    let completion = run_effect(&client, &result.effects[0]).await;
    let result = store.dispatch(completion);

    assert!(result.changed);
    assert!(store.state().forecast.is_loaded());
    let chart = store.state().chart.current().unwrap();
    assert_eq!(chart.labels, vec!["1/1 0:00".to_string()]);
    assert_eq!(chart.values, vec![5.0]);
    assert_eq!(chart.location_label, "Madrid, Spain");
}

#[tokio::test]
async fn test_report_labels_align_with_values() {
    let server = MockServer::start().await;
    mock_madrid_geocoding(&server).await;
    let times: Vec<String> = (0..48)
        .map(|h| format!("2024-03-{:02}T{:02}:00", 10 + h / 24, h % 24))
        .collect();
    let temps: Vec<f64> = (0..48).map(|h| 8.0 + h as f64 * 0.5).collect();
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": {"time": times, "temperature_2m": temps}
        })))
        .mount(&server)
        .await;

    let report = client_for(&server).fetch_report("Madrid").await.unwrap();

    assert_eq!(report.labels.len(), 48);
    assert_eq!(report.temperatures.len(), 48);
    assert_eq!(report.labels[0], "10/3 0:00");
    assert_eq!(report.labels[47], "11/3 23:00");
    assert_eq!(report.place.display_name(), "Madrid, Spain");
}

#[tokio::test]
async fn test_unknown_city_ends_in_not_found_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"generationtime_ms": 0.5})))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut store = EffectStore::new(AppState::default(), reducer);
    let result = store.dispatch(Action::SearchSubmit("Atlantis".into()));
    let completion = run_effect(&client, &result.effects[0]).await;
    store.dispatch(completion);

    assert_eq!(store.state().forecast.error(), Some(NOT_FOUND_MESSAGE));
    assert!(!store.state().chart.is_live());
}

#[tokio::test]
async fn test_missing_hourly_is_parse_error() {
    let server = MockServer::start().await;
    mock_madrid_geocoding(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"latitude": 40.4})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_report("Madrid").await.unwrap_err();

    assert!(matches!(err, ForecastError::Parse(_)), "{err:?}");
    assert!(err.to_string().contains("hourly"));
}

#[tokio::test]
async fn test_api_error_reason_is_surfaced() {
    let server = MockServer::start().await;
    mock_madrid_geocoding(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_report("Madrid").await.unwrap_err();

    assert!(matches!(err, ForecastError::Api { status: 400, .. }));
    assert!(err.to_string().starts_with("Latitude must be in range"));
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).geocode("Madrid").await.unwrap_err();
    assert!(matches!(err, ForecastError::Parse(_)));
}

#[tokio::test]
async fn test_blank_search_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::SearchSubmit("   ".into()));

    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.forecast.is_empty() && s.search_seq == 0);
    server.verify().await;
}
