use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{RecordProvider, base_url, endpoint, get_json};
use crate::config::ProviderConfig;
use crate::models::{Location, MeetUp};

const MEETUP_API: &str = "https://api.meetup.com";
const PROVIDER: &str = "Meetup";
const PAGE_SIZE: &str = "20";

#[derive(Debug, Clone, Deserialize)]
pub struct MeetupGroup {
    pub link: Option<String>,
    pub name: Option<String>,
    /// Unix epoch seconds.
    pub created: Option<i64>,
    pub organizer: Option<Organizer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Organizer {
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct MeetupClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MeetupClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: base_url(config, MEETUP_API),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl RecordProvider for MeetupClient {
    type Record = MeetUp;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<MeetupGroup>> {
        let mut url = endpoint(&self.base_url, "/find/groups")?;
        url.query_pairs_mut()
            .append_pair("sign", "true")
            .append_pair("photo-host", "public")
            .append_pair("location", &location.search_query)
            .append_pair("page", PAGE_SIZE)
            .append_pair("key", &self.api_key);

        debug!(location_id = %location.id, "Finding groups");

        get_json(PROVIDER, self.client.get(url)).await
    }
}
