use anyhow::{Result, bail};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{base_url, endpoint, get_json};
use crate::config::ProviderConfig;

const GOOGLE_MAPS_API: &str = "https://maps.googleapis.com";
const PROVIDER: &str = "Google Geocoding";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: base_url(config, GOOGLE_MAPS_API),
            api_key: config.api_key.clone(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        PROVIDER
    }

    /// Geocodes free text, returning results in the provider's ranking.
    ///
    /// An empty vector means the address was understood but nothing matched.
    pub async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>> {
        let mut url = endpoint(&self.base_url, "/maps/api/geocode/json")?;
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", &self.api_key);

        debug!(query, "Geocoding location");

        let response: GeocodeResponse = get_json(PROVIDER, self.client.get(url)).await?;

        match response.status.as_deref() {
            None | Some("OK" | "ZERO_RESULTS") => Ok(response.results),
            Some(status) => bail!(
                "{PROVIDER} API error: {status} - {}",
                response.error_message.unwrap_or_default()
            ),
        }
    }
}
