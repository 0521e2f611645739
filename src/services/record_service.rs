use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{ExplorerError, KeyedLocks};
use crate::clients::RecordProvider;
use crate::db::Store;
use crate::domain::{CacheState, Domain, LocationId};
use crate::models::{DomainRecord, Location, normalize_batch};

/// Cache-or-fetch for one record domain.
///
/// Stored batches younger than the domain threshold are served as-is.
/// Anything else is refetched from the provider, normalized as a whole and
/// swapped in atomically. A failed refresh leaves the stored batch untouched.
pub struct RecordService<P: RecordProvider> {
    store: Store,
    provider: Arc<P>,
    in_flight: KeyedLocks<LocationId>,
}

impl<P: RecordProvider> RecordService<P> {
    #[must_use]
    pub fn new(store: Store, provider: Arc<P>) -> Self {
        Self {
            store,
            provider,
            in_flight: KeyedLocks::new(),
        }
    }

    #[must_use]
    pub const fn domain(&self) -> Domain {
        <P::Record as DomainRecord>::DOMAIN
    }

    /// Returns the location's records, refetching when missing or stale.
    ///
    /// Calls for the same location are serialized so that at most one
    /// provider fetch is in flight; later callers see the fresh batch.
    ///
    /// # Errors
    ///
    /// - [`ExplorerError::Upstream`] when the provider call fails
    /// - [`ExplorerError::Normalization`] when any item cannot be mapped
    /// - [`ExplorerError::Store`] on persistence failures
    pub async fn get_records(&self, location: &Location) -> Result<Vec<P::Record>, ExplorerError> {
        let domain = self.domain();
        let _guard = self.in_flight.lock(location.id).await;

        let stored: Vec<P::Record> = self
            .store
            .list_records(location.id)
            .await
            .map_err(ExplorerError::store)?;

        let state = CacheState::classify(
            domain,
            stored.first().map(DomainRecord::created_time),
            Utc::now(),
        );

        metrics::counter!(
            "cache_lookups_total",
            "domain" => domain.as_str(),
            "state" => state.as_str()
        )
        .increment(1);
        debug!(
            %domain,
            location_id = %location.id,
            state = state.as_str(),
            rows = stored.len(),
            "Cache lookup"
        );

        match state {
            CacheState::Fresh => Ok(stored),
            CacheState::Miss => self.refresh(location, false).await,
            CacheState::Stale => self.refresh(location, true).await,
        }
    }

    async fn refresh(
        &self,
        location: &Location,
        invalidate: bool,
    ) -> Result<Vec<P::Record>, ExplorerError> {
        let domain = self.domain();
        let provider = self.provider.name();

        let raw = self.provider.fetch(location).await.map_err(|e| {
            warn!(%domain, provider, location_id = %location.id, error = %e, "Provider fetch failed");
            ExplorerError::upstream(provider, &e)
        })?;

        let created_time = Utc::now();
        let records = normalize_batch::<P::Record>(raw, created_time).map_err(|e| {
            warn!(%domain, location_id = %location.id, field = e.field(), "Rejected provider batch");
            ExplorerError::normalization(domain, &e)
        })?;

        self.store
            .replace_records(location.id, records.clone(), invalidate)
            .await
            .map_err(ExplorerError::store)?;

        info!(
            %domain,
            location_id = %location.id,
            rows = records.len(),
            replaced = invalidate,
            "Refreshed records from {provider}"
        );

        Ok(records)
    }
}
