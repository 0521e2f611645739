use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::{DomainRecord, Normalize, NormalizeError};
use crate::clients::yelp::YelpBusiness;
use crate::domain::{Domain, LocationId};
use crate::entities::yelps;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
    pub created_time: DateTime<Utc>,
}

impl Normalize for Restaurant {
    type Raw = YelpBusiness;

    fn normalize(raw: YelpBusiness, created_time: DateTime<Utc>) -> Result<Self, NormalizeError> {
        Ok(Self {
            name: raw.name.ok_or(NormalizeError::MissingField("name"))?,
            image_url: raw.image_url,
            price: raw.price,
            rating: raw.rating,
            url: raw.url,
            created_time,
        })
    }
}

impl DomainRecord for Restaurant {
    type Entity = yelps::Entity;
    type Model = yelps::Model;
    type ActiveModel = yelps::ActiveModel;

    const DOMAIN: Domain = Domain::Restaurants;

    fn location_column() -> yelps::Column {
        yelps::Column::LocationId
    }

    fn order_column() -> yelps::Column {
        yelps::Column::Id
    }

    fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    fn from_model(m: yelps::Model) -> Self {
        Self {
            name: m.name,
            image_url: m.image_url,
            price: m.price,
            rating: m.rating,
            url: m.url,
            created_time: m.created_time,
        }
    }

    fn into_active_model(self, location_id: LocationId) -> yelps::ActiveModel {
        yelps::ActiveModel {
            name: Set(self.name),
            image_url: Set(self.image_url),
            price: Set(self.price),
            rating: Set(self.rating),
            url: Set(self.url),
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
    fn passes_business_fields_through() {
        let raw: YelpBusiness = serde_json::from_value(serde_json::json!({
            "name": "Pike Place Chowder",
            "image_url": "https://s3-media.fl.yelpcdn.com/bphoto/ijju.jpg",
            "price": "$$",
            "rating": 4.5,
            "url": "https://www.yelp.com/biz/pike-place-chowder-seattle",
            "review_count": 7000
        }))
        .unwrap();

        let restaurant = Restaurant::normalize(raw, Utc::now()).unwrap();
        assert_eq!(restaurant.name, "Pike Place Chowder");
        assert_eq!(restaurant.price.as_deref(), Some("$$"));
        assert_eq!(restaurant.rating, Some(4.5));
    }

    #[test]
    fn missing_price_is_allowed() {
        let raw: YelpBusiness =
            serde_json::from_value(serde_json::json!({ "name": "Cafe" })).unwrap();

        let restaurant = Restaurant::normalize(raw, Utc::now()).unwrap();
        assert_eq!(restaurant.price, None);
    }
}
