use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::dates::date_string_from_datetime;
use super::{DomainRecord, Normalize, NormalizeError};
use crate::clients::hiking_project::HikingTrail;
use crate::domain::{Domain, LocationId};
use crate::entities::trails;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub name: String,
    pub location: Option<String>,
    pub length: Option<f64>,
    pub stars: Option<f64>,
    pub star_votes: Option<i64>,
    pub summary: Option<String>,
    pub trail_url: Option<String>,
    pub conditions: Option<String>,
    pub condition_date: Option<String>,
    /// `condition_date` reformatted as a calendar date.
    pub condition_time: Option<String>,
    pub created_time: DateTime<Utc>,
}

impl Normalize for Trail {
    type Raw = HikingTrail;

    fn normalize(raw: HikingTrail, created_time: DateTime<Utc>) -> Result<Self, NormalizeError> {
        let condition_time = raw
            .condition_date
            .as_deref()
            .map(|date| date_string_from_datetime("conditionDate", date))
            .transpose()?;

        Ok(Self {
            name: raw.name.ok_or(NormalizeError::MissingField("name"))?,
            location: raw.location,
            length: raw.length,
            stars: raw.stars,
            star_votes: raw.star_votes,
            summary: raw.summary,
            trail_url: raw.url,
            conditions: raw.condition_status,
            condition_date: raw.condition_date,
            condition_time,
            created_time,
        })
    }
}

impl DomainRecord for Trail {
    type Entity = trails::Entity;
    type Model = trails::Model;
    type ActiveModel = trails::ActiveModel;

    const DOMAIN: Domain = Domain::Trails;

    fn location_column() -> trails::Column {
        trails::Column::LocationId
    }

    fn order_column() -> trails::Column {
        trails::Column::Id
    }

    fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    fn from_model(m: trails::Model) -> Self {
        Self {
            name: m.name,
            location: m.location,
            length: m.length,
            stars: m.stars,
            star_votes: m.star_votes,
            summary: m.summary,
            trail_url: m.trail_url,
            conditions: m.conditions,
            condition_date: m.condition_date,
            condition_time: m.condition_time,
            created_time: m.created_time,
        }
    }

    fn into_active_model(self, location_id: LocationId) -> trails::ActiveModel {
        trails::ActiveModel {
            name: Set(self.name),
            location: Set(self.location),
            length: Set(self.length),
            stars: Set(self.stars),
            star_votes: Set(self.star_votes),
            summary: Set(self.summary),
            trail_url: Set(self.trail_url),
            conditions: Set(self.conditions),
            condition_date: Set(self.condition_date),
            condition_time: Set(self.condition_time),
            created_time: Set(self.created_time),
            location_id: Set(location_id.value()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(condition_date: serde_json::Value) -> HikingTrail {
        serde_json::from_value(serde_json::json!({
            "id": 7_005_246,
            "name": "Rattlesnake Ledge",
            "location": "North Bend, Washington",
            "length": 4.3,
            "stars": 4.4,
            "starVotes": 82,
            "summary": "A popular hike with views of Rattlesnake Lake.",
            "url": "https://www.hikingproject.com/trail/7005246/rattlesnake-ledge",
            "conditionStatus": "All Clear",
            "conditionDate": condition_date
        }))
        .unwrap()
    }

    #[test]
    fn keeps_condition_date_and_adds_calendar_form() {
        let trail = Trail::normalize(raw(serde_json::json!("2019-01-14 18:47:36")), Utc::now())
            .unwrap();
        assert_eq!(trail.condition_date.as_deref(), Some("2019-01-14 18:47:36"));
        assert_eq!(trail.condition_time.as_deref(), Some("Mon Jan 14 2019"));
        assert_eq!(trail.star_votes, Some(82));
        assert_eq!(trail.conditions.as_deref(), Some("All Clear"));
        assert_eq!(
            trail.trail_url.as_deref(),
            Some("https://www.hikingproject.com/trail/7005246/rattlesnake-ledge")
        );
    }

    #[test]
    fn missing_condition_date_leaves_both_empty() {
        let trail = Trail::normalize(raw(serde_json::Value::Null), Utc::now()).unwrap();
        assert_eq!(trail.condition_date, None);
        assert_eq!(trail.condition_time, None);
    }

    #[test]
    fn garbage_condition_date_fails_with_field() {
        let err = Trail::normalize(raw(serde_json::json!("last tuesday")), Utc::now())
            .unwrap_err();
        assert_eq!(err.field(), "conditionDate");
    }
}
