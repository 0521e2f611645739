use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{RecordProvider, base_url, endpoint, get_json};
use crate::config::ProviderConfig;
use crate::models::{Location, Movie};

const TMDB_API: &str = "https://api.themoviedb.org";
const PROVIDER: &str = "TMDB";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub poster_path: Option<String>,
    pub popularity: Option<f64>,
    pub release_date: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: base_url(config, TMDB_API),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl RecordProvider for TmdbClient {
    type Record = Movie;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    /// Movies are matched on the location's search text, not its coordinates.
    async fn fetch(&self, location: &Location) -> Result<Vec<TmdbMovie>> {
        let mut url = endpoint(&self.base_url, "/3/search/movie")?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("query", &location.search_query);

        debug!(location_id = %location.id, "Searching movies");

        let response: SearchResponse = get_json(PROVIDER, self.client.get(url)).await?;
        Ok(response.results)
    }
}
