use std::sync::Arc;
use std::time::Duration;

use crate::clients::darksky::DarkSkyClient;
use crate::clients::geocode::GeocodeClient;
use crate::clients::hiking_project::HikingProjectClient;
use crate::clients::meetup::MeetupClient;
use crate::clients::tmdb::TmdbClient;
use crate::clients::yelp::YelpClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{LocationService, RecordService};

/// Build the HTTP client shared by every provider so connections are pooled.
fn build_shared_http_client(timeout_seconds: u64, user_agent: &str) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(user_agent)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub locations: Arc<LocationService>,

    pub weather: Arc<RecordService<DarkSkyClient>>,

    pub restaurants: Arc<RecordService<YelpClient>>,

    pub movies: Arc<RecordService<TmdbClient>>,

    pub meetups: Arc<RecordService<MeetupClient>>,

    pub trails: Arc<RecordService<HikingProjectClient>>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    /// Wires every service around an already opened store.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let providers = &config.providers;
        let http_client =
            build_shared_http_client(providers.request_timeout_seconds, &providers.user_agent)?;

        let geocoder = Arc::new(GeocodeClient::with_shared_client(
            http_client.clone(),
            &providers.geocode,
        ));
        let locations = Arc::new(LocationService::new(store.clone(), geocoder));

        let weather = Arc::new(RecordService::new(
            store.clone(),
            Arc::new(DarkSkyClient::with_shared_client(
                http_client.clone(),
                &providers.weather,
            )),
        ));
        let restaurants = Arc::new(RecordService::new(
            store.clone(),
            Arc::new(YelpClient::with_shared_client(
                http_client.clone(),
                &providers.yelp,
            )),
        ));
        let movies = Arc::new(RecordService::new(
            store.clone(),
            Arc::new(TmdbClient::with_shared_client(
                http_client.clone(),
                &providers.movies,
            )),
        ));
        let meetups = Arc::new(RecordService::new(
            store.clone(),
            Arc::new(MeetupClient::with_shared_client(
                http_client.clone(),
                &providers.meetups,
            )),
        ));
        let trails = Arc::new(RecordService::new(
            store.clone(),
            Arc::new(HikingProjectClient::with_shared_client(
                http_client,
                &providers.trails,
            )),
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            locations,
            weather,
            restaurants,
            movies,
            meetups,
            trails,
        })
    }
}
