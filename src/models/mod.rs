//! Canonical record shapes served by the API and stored per location.
//!
//! Every domain record implements [`DomainRecord`], which spells out the
//! column mapping for its table, and [`Normalize`], which turns one raw
//! provider item into the record.

pub mod dates;
pub mod location;
pub mod meetup;
pub mod movie;
pub mod restaurant;
pub mod trail;
pub mod weather;

pub use location::{Location, NewLocation};
pub use meetup::MeetUp;
pub use movie::Movie;
pub use restaurant::Restaurant;
pub use trail::Trail;
pub use weather::Weather;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, FromQueryResult, IntoActiveModel, ModelTrait,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{Domain, LocationId};

/// Why a raw provider item could not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl NormalizeError {
    /// Path of the offending provider field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) | Self::InvalidField { field, .. } => field,
        }
    }
}

/// A record stored in batches keyed by location.
pub trait DomainRecord: Serialize + Clone + Send + Sync + Sized + 'static {
    type Entity: EntityTrait<Model = Self::Model, ActiveModel = Self::ActiveModel>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send;

    const DOMAIN: Domain;

    /// Foreign key column pointing at `locations.id`.
    fn location_column() -> <Self::Entity as EntityTrait>::Column;

    /// Column whose ascending order reproduces insertion order.
    fn order_column() -> <Self::Entity as EntityTrait>::Column;

    fn created_time(&self) -> DateTime<Utc>;

    fn from_model(model: Self::Model) -> Self;

    fn into_active_model(self, location_id: LocationId) -> Self::ActiveModel;
}

/// Mapping from a raw provider item into a record.
///
/// `created_time` is snapshotted once per batch by the caller so every row of
/// a batch ages together.
pub trait Normalize: DomainRecord {
    type Raw: DeserializeOwned + Send + 'static;

    fn normalize(raw: Self::Raw, created_time: DateTime<Utc>) -> Result<Self, NormalizeError>;
}

/// Normalizes a whole batch, failing on the first bad item.
pub fn normalize_batch<R: Normalize>(
    raw: Vec<R::Raw>,
    created_time: DateTime<Utc>,
) -> Result<Vec<R>, NormalizeError> {
    raw.into_iter()
        .map(|item| R::normalize(item, created_time))
        .collect()
}
