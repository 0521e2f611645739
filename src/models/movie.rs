use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::{DomainRecord, Normalize, NormalizeError};
use crate::clients::tmdb::TmdbMovie;
use crate::domain::{Domain, LocationId};
use crate::entities::movies;

/// CDN prefix the poster path is appended to.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w370_and_h556_bestv2/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub overview: Option<String>,
    pub average_votes: Option<f64>,
    pub total_votes: Option<i64>,
    pub image_url: String,
    pub popularity: Option<f64>,
    pub released_on: Option<String>,
    pub created_time: DateTime<Utc>,
}

/// Concatenates the CDN base with a poster path verbatim. A missing path is
/// appended as `null`, leaving a dead link rather than dropping the movie.
#[must_use]
pub fn poster_url(poster_path: Option<&str>) -> String {
    format!("{POSTER_BASE_URL}{}", poster_path.unwrap_or("null"))
}

impl Normalize for Movie {
    type Raw = TmdbMovie;

    fn normalize(raw: TmdbMovie, created_time: DateTime<Utc>) -> Result<Self, NormalizeError> {
        Ok(Self {
            title: raw.title.ok_or(NormalizeError::MissingField("title"))?,
            overview: raw.overview,
            average_votes: raw.vote_average,
            total_votes: raw.vote_count,
            image_url: poster_url(raw.poster_path.as_deref()),
            popularity: raw.popularity,
            released_on: raw.release_date,
            created_time,
        })
    }
}

impl DomainRecord for Movie {
    type Entity = movies::Entity;
    type Model = movies::Model;
    type ActiveModel = movies::ActiveModel;

    const DOMAIN: Domain = Domain::Movies;

    fn location_column() -> movies::Column {
        movies::Column::LocationId
    }

    fn order_column() -> movies::Column {
        movies::Column::Id
    }

    fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    fn from_model(m: movies::Model) -> Self {
        Self {
            title: m.title,
            overview: m.overview,
            average_votes: m.average_votes,
            total_votes: m.total_votes,
            image_url: m.image_url,
            popularity: m.popularity,
            released_on: m.released_on,
            created_time: m.created_time,
        }
    }

    fn into_active_model(self, location_id: LocationId) -> movies::ActiveModel {
        movies::ActiveModel {
            title: Set(self.title),
            overview: Set(self.overview),
            average_votes: Set(self.average_votes),
            total_votes: Set(self.total_votes),
            image_url: Set(self.image_url),
            popularity: Set(self.popularity),
            released_on: Set(self.released_on),
            created_time: Set(self.created_time),
            location_id: Set(location_id.value()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(poster_path: serde_json::Value) -> TmdbMovie {
        serde_json::from_value(serde_json::json!({
            "title": "Sleepless in Seattle",
            "overview": "A recently widowed man's son calls a radio talk-show.",
            "vote_average": 6.6,
            "vote_count": 881,
            "poster_path": poster_path,
            "popularity": 8.2,
            "release_date": "1993-06-24"
        }))
        .unwrap()
    }

    #[test]
    fn builds_image_url_from_poster_path() {
        let movie = Movie::normalize(
            raw(serde_json::json!("/afkYP15OeUOD0tFEmj6VvejuOcz.jpg")),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(
            movie.image_url,
            "https://image.tmdb.org/t/p/w370_and_h556_bestv2//afkYP15OeUOD0tFEmj6VvejuOcz.jpg"
        );
        assert_eq!(movie.average_votes, Some(6.6));
        assert_eq!(movie.total_votes, Some(881));
        assert_eq!(movie.released_on.as_deref(), Some("1993-06-24"));
    }

    #[test]
    fn absent_poster_passes_through_unsanitized() {
        let movie = Movie::normalize(raw(serde_json::Value::Null), Utc::now()).unwrap();
        assert_eq!(
            movie.image_url,
            "https://image.tmdb.org/t/p/w370_and_h556_bestv2/null"
        );
    }
}
