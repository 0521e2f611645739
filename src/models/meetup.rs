use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::dates::date_string_from_unix;
use super::{DomainRecord, Normalize, NormalizeError};
use crate::clients::meetup::MeetupGroup;
use crate::domain::{Domain, LocationId};
use crate::entities::meetups;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetUp {
    pub link: String,
    pub name: String,
    pub creation_date: Option<String>,
    pub host: String,
    pub created_time: DateTime<Utc>,
}

impl Normalize for MeetUp {
    type Raw = MeetupGroup;

    fn normalize(raw: MeetupGroup, created_time: DateTime<Utc>) -> Result<Self, NormalizeError> {
        let host = raw
            .organizer
            .and_then(|organizer| organizer.name)
            .ok_or(NormalizeError::MissingField("organizer.name"))?;

        let creation_date = raw
            .created
            .map(|seconds| date_string_from_unix("created", seconds))
            .transpose()?;

        Ok(Self {
            link: raw.link.ok_or(NormalizeError::MissingField("link"))?,
            name: raw.name.ok_or(NormalizeError::MissingField("name"))?,
            creation_date,
            host,
            created_time,
        })
    }
}

impl DomainRecord for MeetUp {
    type Entity = meetups::Entity;
    type Model = meetups::Model;
    type ActiveModel = meetups::ActiveModel;

    const DOMAIN: Domain = Domain::Meetups;

    fn location_column() -> meetups::Column {
        meetups::Column::LocationId
    }

    fn order_column() -> meetups::Column {
        meetups::Column::Id
    }

    fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    fn from_model(m: meetups::Model) -> Self {
        Self {
            link: m.link,
            name: m.name,
            creation_date: m.creation_date,
            host: m.host,
            created_time: m.created_time,
        }
    }

    fn into_active_model(self, location_id: LocationId) -> meetups::ActiveModel {
        meetups::ActiveModel {
            link: Set(self.link),
            name: Set(self.name),
            creation_date: Set(self.creation_date),
            host: Set(self.host),
            created_time: Set(self.created_time),
            location_id: Set(location_id.value()),
            ..Default::default()
        }
    }
}
