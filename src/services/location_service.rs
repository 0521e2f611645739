use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{ExplorerError, KeyedLocks};
use crate::clients::geocode::GeocodeClient;
use crate::db::Store;
use crate::models::{Location, NewLocation};

/// Resolves free text to a stored [`Location`], geocoding unseen queries once.
pub struct LocationService {
    store: Store,
    geocoder: Arc<GeocodeClient>,
    in_flight: KeyedLocks<String>,
}

impl LocationService {
    #[must_use]
    pub fn new(store: Store, geocoder: Arc<GeocodeClient>) -> Self {
        Self {
            store,
            geocoder,
            in_flight: KeyedLocks::new(),
        }
    }

    /// Looks the query up by exact text; on a miss, geocodes it, keeps the
    /// top-ranked result and stores it.
    ///
    /// # Errors
    ///
    /// - [`ExplorerError::Provider`] when the geocoder has no match
    /// - [`ExplorerError::Upstream`] when the geocoder cannot be reached
    /// - [`ExplorerError::Store`] on persistence failures
    pub async fn resolve(&self, query: &str) -> Result<Location, ExplorerError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ExplorerError::Provider {
                provider: self.geocoder.name(),
                message: "empty location query".to_string(),
            });
        }

        if let Some(location) = self.lookup(query).await? {
            return Ok(location);
        }

        let _guard = self.in_flight.lock(query.to_string()).await;

        // Another request may have stored it while this one waited.
        if let Some(location) = self.lookup(query).await? {
            return Ok(location);
        }

        let provider = self.geocoder.name();
        let results = self.geocoder.geocode(query).await.map_err(|e| {
            warn!(query, error = %e, "Geocoding failed");
            ExplorerError::upstream(provider, &e)
        })?;

        let Some(best) = results.into_iter().next() else {
            metrics::counter!("location_lookups_total", "outcome" => "not_found").increment(1);
            return Err(ExplorerError::Provider {
                provider,
                message: format!("no results for '{query}'"),
            });
        };

        let location = self
            .store
            .insert_location(&NewLocation::from_geocode(query, best))
            .await
            .map_err(ExplorerError::store)?;

        metrics::counter!("location_lookups_total", "outcome" => "geocoded").increment(1);
        info!(
            query,
            location_id = %location.id,
            formatted_query = %location.formatted_query,
            "Resolved new location"
        );

        Ok(location)
    }

    async fn lookup(&self, query: &str) -> Result<Option<Location>, ExplorerError> {
        let found = self
            .store
            .find_location(query)
            .await
            .map_err(ExplorerError::store)?;

        if let Some(location) = &found {
            metrics::counter!("location_lookups_total", "outcome" => "cached").increment(1);
            debug!(query, location_id = %location.id, "Location served from store");
        }

        Ok(found)
    }
}
