use axum::{Router, http::HeaderValue, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod error;
mod location;
mod observability;
mod records;
mod system;
pub mod types;

pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;
    let cors_origins = server.cors_allowed_origins.clone();
    let static_dir = server.static_dir.clone();

    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let mut app = Router::new()
        .route("/location", get(location::get_location))
        .route("/weather", get(records::get_weather))
        .route("/yelp", get(records::get_restaurants))
        .route("/movies", get(records::get_movies))
        .route("/meetups", get(records::get_meetups))
        .route("/trails", get(records::get_trails))
        .route("/status", get(system::get_status))
        .route("/health/live", get(system::health_live))
        .route("/health/ready", get(system::health_ready))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
