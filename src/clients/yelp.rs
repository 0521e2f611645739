use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{RecordProvider, base_url, endpoint, get_json};
use crate::config::ProviderConfig;
use crate::models::{Location, Restaurant};

const YELP_API: &str = "https://api.yelp.com";
const PROVIDER: &str = "Yelp";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YelpBusiness {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YelpClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: base_url(config, YELP_API),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl RecordProvider for YelpClient {
    type Record = Restaurant;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<YelpBusiness>> {
        let mut url = endpoint(&self.base_url, "/v3/businesses/search")?;
        url.query_pairs_mut()
            .append_pair("latitude", &location.latitude.to_string())
            .append_pair("longitude", &location.longitude.to_string());

        debug!(location_id = %location.id, "Searching businesses");

        let request = self.client.get(url).bearer_auth(&self.api_key);
        let response: SearchResponse = get_json(PROVIDER, request).await?;
        Ok(response.businesses)
    }
}
