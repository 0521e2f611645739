use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::dates::date_string_from_unix;
use super::{DomainRecord, Normalize, NormalizeError};
use crate::clients::darksky::DarkSkyDay;
use crate::domain::{Domain, LocationId};
use crate::entities::weathers;

/// One day of forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    pub forecast: Option<String>,
    pub time: String,
    pub created_time: DateTime<Utc>,
}

impl Normalize for Weather {
    type Raw = DarkSkyDay;

    fn normalize(raw: DarkSkyDay, created_time: DateTime<Utc>) -> Result<Self, NormalizeError> {
        let time = raw.time.ok_or(NormalizeError::MissingField("time"))?;

        Ok(Self {
            forecast: raw.summary,
            time: date_string_from_unix("time", time)?,
            created_time,
        })
    }
}

impl DomainRecord for Weather {
    type Entity = weathers::Entity;
    type Model = weathers::Model;
    type ActiveModel = weathers::ActiveModel;

    const DOMAIN: Domain = Domain::Weather;

    fn location_column() -> weathers::Column {
        weathers::Column::LocationId
    }

    fn order_column() -> weathers::Column {
        weathers::Column::Id
    }

    fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    fn from_model(m: weathers::Model) -> Self {
        Self {
            forecast: m.forecast,
            time: m.time,
            created_time: m.created_time,
        }
    }

    fn into_active_model(self, location_id: LocationId) -> weathers::ActiveModel {
        weathers::ActiveModel {
            forecast: Set(self.forecast),
            time: Set(self.time),
            created_time: Set(self.created_time),
            location_id: Set(location_id.value()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_epoch_seconds_to_calendar_date() {
        let now = Utc::now();
        let raw = DarkSkyDay {
            time: Some(1_547_510_400),
            summary: Some("Light rain in the morning.".to_string()),
        };

        let weather = Weather::normalize(raw, now).unwrap();
        assert_eq!(weather.time, "Tue Jan 15 2019");
        assert_eq!(weather.forecast.as_deref(), Some("Light rain in the morning."));
        assert_eq!(weather.created_time, now);
    }

    #[test]
    fn missing_time_is_reported() {
        let raw = DarkSkyDay {
            time: None,
            summary: Some("Clear".to_string()),
        };

        let err = Weather::normalize(raw, Utc::now()).unwrap_err();
        assert_eq!(err, NormalizeError::MissingField("time"));
    }
}
