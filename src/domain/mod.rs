//! Domain types for the explorer with strong typing.
//!
//! This module provides the identifiers and enumerations shared by the
//! location resolver and the per-domain record caches. It follows the Newtype
//! pattern so a location id is never confused with a record id.

pub mod staleness;

pub use staleness::{CacheState, is_stale};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a stored [`Location`](crate::models::Location).
///
/// # Examples
///
/// ```rust
/// use city_explorer::domain::LocationId;
///
/// let id = LocationId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LocationId(i32);

impl LocationId {
    /// Creates a new `LocationId` from a raw i32 value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "LocationId should be non-negative");
        Self(id)
    }

    /// Returns the underlying i32 value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LocationId> for i32 {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

impl From<i32> for LocationId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for LocationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// The five data domains cached per location.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Weather,
    Restaurants,
    Movies,
    Meetups,
    Trails,
}

impl Domain {
    pub const ALL: [Self; 5] = [
        Self::Weather,
        Self::Restaurants,
        Self::Movies,
        Self::Meetups,
        Self::Trails,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Restaurants => "restaurants",
            Self::Movies => "movies",
            Self::Meetups => "meetups",
            Self::Trails => "trails",
        }
    }

    /// Name of the table holding this domain's batches.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Weather => "weathers",
            Self::Restaurants => "yelps",
            Self::Movies => "movies",
            Self::Meetups => "meetups",
            Self::Trails => "trails",
        }
    }

    /// Maximum age of a cached batch, in minutes, before it must be refetched.
    #[must_use]
    pub const fn staleness_threshold_minutes(self) -> i64 {
        match self {
            Self::Weather => 30,
            Self::Restaurants => 7 * 24 * 60,
            Self::Movies | Self::Meetups => 24 * 60,
            Self::Trails => 28 * 24 * 60,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_id_roundtrips_through_json() {
        let id = LocationId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: LocationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn thresholds_match_policy_table() {
        assert_eq!(Domain::Weather.staleness_threshold_minutes(), 30);
        assert_eq!(Domain::Restaurants.staleness_threshold_minutes(), 10_080);
        assert_eq!(Domain::Movies.staleness_threshold_minutes(), 1_440);
        assert_eq!(Domain::Meetups.staleness_threshold_minutes(), 1_440);
        assert_eq!(Domain::Trails.staleness_threshold_minutes(), 40_320);
    }

    #[test]
    fn tables_are_distinct() {
        let mut tables: Vec<_> = Domain::ALL.iter().map(|d| d.table()).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), Domain::ALL.len());
    }
}
