use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{RecordProvider, base_url, endpoint, get_json};
use crate::config::ProviderConfig;
use crate::models::{Location, Trail};

const HIKING_PROJECT_API: &str = "https://www.hikingproject.com";
const PROVIDER: &str = "Hiking Project";
const MAX_DISTANCE_MILES: &str = "10";

#[derive(Debug, Deserialize)]
struct TrailsResponse {
    #[serde(default)]
    trails: Vec<HikingTrail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HikingTrail {
    pub name: Option<String>,
    pub location: Option<String>,
    pub length: Option<f64>,
    pub stars: Option<f64>,
    pub star_votes: Option<i64>,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub condition_status: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`.
    pub condition_date: Option<String>,
}

#[derive(Clone)]
pub struct HikingProjectClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HikingProjectClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: base_url(config, HIKING_PROJECT_API),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl RecordProvider for HikingProjectClient {
    type Record = Trail;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<HikingTrail>> {
        let mut url = endpoint(&self.base_url, "/data/get-trails")?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("lat", &location.latitude.to_string())
            .append_pair("lon", &location.longitude.to_string())
            .append_pair("maxDistance", MAX_DISTANCE_MILES);

        debug!(location_id = %location.id, "Fetching nearby trails");

        let response: TrailsResponse = get_json(PROVIDER, self.client.get(url)).await?;
        Ok(response.trails)
    }
}
