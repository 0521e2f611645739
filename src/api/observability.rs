use crate::api::AppState;
use crate::domain::Domain;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Record domain served by a route, `None` for location and system routes.
fn record_domain(route: &str) -> Option<Domain> {
    match route {
        "/weather" => Some(Domain::Weather),
        "/yelp" => Some(Domain::Restaurants),
        "/movies" => Some(Domain::Movies),
        "/meetups" => Some(Domain::Meetups),
        "/trails" => Some(Domain::Trails),
        _ => None,
    }
}

/// The `data` parameter a lookup was made with, if any.
fn requested_place(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "data")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

const fn status_outcome(status: u16) -> &'static str {
    match status {
        500.. => "error",
        400..=499 => "rejected",
        _ => "served",
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_string(), |mp| mp.as_str().to_string());
    let domain = record_domain(&route).map_or("none", Domain::as_str);
    let place = requested_place(req.uri().query());

    let span = info_span!(
        "lookup",
        request_id = %request_id,
        route = %route,
        domain = domain,
        place = place.as_deref(),
    );

    async move {
        let response = next.run(req).await;

        let status = response.status().as_u16();
        let outcome = status_outcome(status);

        // Place names stay out of labels; they are unbounded.
        let labels = [
            ("route", route),
            ("domain", domain.to_string()),
            ("outcome", outcome.to_string()),
        ];

        metrics::counter!("explorer_requests_total", &labels).increment(1);
        metrics::histogram!("explorer_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        info!(
            event = "lookup_finished",
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            status_code = status,
            outcome,
            "Lookup finished"
        );

        response
    }
    .instrument(span)
    .await
}
