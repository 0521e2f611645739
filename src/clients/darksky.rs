use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{RecordProvider, base_url, endpoint, get_json};
use crate::config::ProviderConfig;
use crate::models::{Location, Weather};

const DARKSKY_API: &str = "https://api.darksky.net";
const PROVIDER: &str = "Dark Sky";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct Daily {
    #[serde(default)]
    data: Vec<DarkSkyDay>,
}

/// One entry of the daily forecast block.
#[derive(Debug, Clone, Deserialize)]
pub struct DarkSkyDay {
    pub time: Option<i64>,
    pub summary: Option<String>,
}

#[derive(Clone)]
pub struct DarkSkyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DarkSkyClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: base_url(config, DARKSKY_API),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl RecordProvider for DarkSkyClient {
    type Record = Weather;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<DarkSkyDay>> {
        let path = format!(
            "/forecast/{}/{},{}",
            self.api_key, location.latitude, location.longitude
        );
        let url = endpoint(&self.base_url, &path)?;

        debug!(location_id = %location.id, "Fetching daily forecast");

        let response: ForecastResponse = get_json(PROVIDER, self.client.get(url)).await?;
        Ok(response.daily.data)
    }
}
