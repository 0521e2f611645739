use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

use crate::entities::{locations, prelude::*};
use crate::models::{Location, NewLocation};

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_query(&self, search_query: &str) -> Result<Option<Location>> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .one(&self.conn)
            .await?;

        Ok(row.map(Location::from))
    }

    pub async fn insert(&self, location: &NewLocation) -> Result<Location> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        // Losing a race on the unique index is fine: the winner's row is read back.
        let inserted = Locations::insert(active_model)
            .on_conflict(
                OnConflict::column(locations::Column::SearchQuery)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await;

        match inserted {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }

        self.find_by_query(&location.search_query)
            .await?
            .with_context(|| {
                format!(
                    "Location '{}' missing right after insert",
                    location.search_query
                )
            })
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Locations::find().count(&self.conn).await?)
    }
}
