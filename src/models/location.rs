use serde::{Deserialize, Serialize};

use crate::clients::geocode::GeocodeResult;
use crate::domain::LocationId;
use crate::entities::locations;

/// A resolved place. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A location that has been geocoded but not yet assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    /// Builds a location from the geocoder's top-ranked result.
    #[must_use]
    pub fn from_geocode(search_query: &str, result: GeocodeResult) -> Self {
        Self {
            search_query: search_query.to_string(),
            formatted_query: result.formatted_address,
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
        }
    }
}

impl From<locations::Model> for Location {
    fn from(m: locations::Model) -> Self {
        Self {
            id: LocationId::new(m.id),
            search_query: m.search_query,
            formatted_query: m.formatted_query,
            latitude: m.latitude,
            longitude: m.longitude,
        }
    }
}
