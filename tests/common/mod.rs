//! Shared fixtures: a throwaway SQLite file and every provider pointed at one
//! wiremock server.

#![allow(dead_code)]

use city_explorer::config::{Config, ProviderConfig};
use city_explorer::state::SharedState;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";
pub const SEATTLE_LAT: f64 = 47.606_209_5;
pub const SEATTLE_LNG: f64 = -122.332_070_8;

pub fn test_config(server: &MockServer, name: &str) -> Config {
    let db_path = std::env::temp_dir().join(format!(
        "city-explorer-{name}-{}.db",
        uuid::Uuid::new_v4()
    ));

    let provider = ProviderConfig {
        base_url: Some(server.uri()),
        api_key: API_KEY.to_string(),
    };

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.providers.request_timeout_seconds = 5;
    config.providers.geocode = provider.clone();
    config.providers.weather = provider.clone();
    config.providers.yelp = provider.clone();
    config.providers.movies = provider.clone();
    config.providers.meetups = provider.clone();
    config.providers.trails = provider;
    config
}

pub async fn spawn_state(server: &MockServer, name: &str) -> SharedState {
    SharedState::new(test_config(server, name))
        .await
        .expect("failed to build shared state")
}

pub fn seattle_geocode() -> Value {
    json!({
        "status": "OK",
        "results": [
            {
                "formatted_address": "Seattle, WA, USA",
                "geometry": { "location": { "lat": SEATTLE_LAT, "lng": SEATTLE_LNG } }
            },
            {
                "formatted_address": "Seattle Hill, WA, USA",
                "geometry": { "location": { "lat": 47.87, "lng": -122.17 } }
            }
        ]
    })
}

/// Mounts a geocode response for `address`, asserting it is hit `calls` times.
pub async fn mount_geocode(server: &MockServer, address: &str, body: Value, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", address))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}

pub fn forecast(days: &[(i64, &str)]) -> Value {
    let data: Vec<Value> = days
        .iter()
        .map(|(time, summary)| json!({ "time": time, "summary": summary, "icon": "rain" }))
        .collect();

    json!({
        "latitude": SEATTLE_LAT,
        "longitude": SEATTLE_LNG,
        "daily": { "summary": "Rain all week.", "data": data }
    })
}

pub fn forecast_path() -> String {
    format!("/forecast/{API_KEY}/{SEATTLE_LAT},{SEATTLE_LNG}")
}
