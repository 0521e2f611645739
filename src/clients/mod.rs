//! HTTP clients for the third-party providers.
//!
//! Each domain client implements [`RecordProvider`]; the geocoder stands
//! alone because locations are resolved before any domain is queried.

pub mod darksky;
pub mod geocode;
pub mod hiking_project;
pub mod meetup;
pub mod tmdb;
pub mod yelp;

use anyhow::{Context, Result, anyhow};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ProviderConfig;
use crate::models::{Location, Normalize};

/// Source of raw items for one record domain.
#[async_trait::async_trait]
pub trait RecordProvider: Send + Sync + 'static {
    type Record: Normalize;

    /// Human readable provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fetches the raw items for a location, in the provider's order.
    async fn fetch(&self, location: &Location) -> Result<Vec<<Self::Record as Normalize>::Raw>>;
}

/// Resolves the base URL for a provider, falling back to its public endpoint.
pub(crate) fn base_url(config: &ProviderConfig, default: &str) -> String {
    config
        .base_url
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

pub(crate) fn endpoint(base: &str, path: &str) -> Result<Url> {
    Url::parse(&format!("{base}{path}")).with_context(|| format!("Invalid provider URL: {base}"))
}

/// Sends a GET request and decodes a JSON body, treating any non-2xx status
/// as an error. Transport errors are stripped of their URL so API keys
/// embedded in query strings never reach logs.
pub(crate) async fn get_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            record_outcome(provider, if e.is_timeout() { "timeout" } else { "transport_error" });
            let e = e.without_url();
            return Err(anyhow!(e).context(format!("{provider} request failed")));
        }
    };

    if !response.status().is_success() {
        record_outcome(provider, "http_error");
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("{provider} API error: {status} - {body}"));
    }

    match response.json::<T>().await {
        Ok(body) => {
            record_outcome(provider, "success");
            Ok(body)
        }
        Err(e) => {
            record_outcome(provider, "decode_error");
            Err(anyhow!(e.without_url()).context(format!("{provider} returned an unexpected payload")))
        }
    }
}

fn record_outcome(provider: &'static str, outcome: &'static str) {
    metrics::counter!("provider_requests_total", "provider" => provider, "outcome" => outcome)
        .increment(1);
}
