use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;

use crate::domain::LocationId;
use crate::models::DomainRecord;

/// Batch storage shared by every domain table.
///
/// The table, key column and field mapping all come from the record's
/// [`DomainRecord`] implementation.
pub struct RecordRepository {
    conn: DatabaseConnection,
}

impl RecordRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list<R: DomainRecord>(&self, location_id: LocationId) -> Result<Vec<R>> {
        let rows = R::Entity::find()
            .filter(R::location_column().eq(location_id.value()))
            .order_by_asc(R::order_column())
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(R::from_model).collect())
    }

    pub async fn replace<R: DomainRecord>(
        &self,
        location_id: LocationId,
        records: Vec<R>,
        invalidate: bool,
    ) -> Result<()> {
        let count = records.len();
        let models: Vec<R::ActiveModel> = records
            .into_iter()
            .map(|record| record.into_active_model(location_id))
            .collect();

        let txn = self.conn.begin().await?;

        if invalidate {
            let deleted = R::Entity::delete_many()
                .filter(R::location_column().eq(location_id.value()))
                .exec(&txn)
                .await?;
            debug!(
                table = R::DOMAIN.table(),
                %location_id,
                rows = deleted.rows_affected,
                "Invalidated stale batch"
            );
        }

        if !models.is_empty() {
            R::Entity::insert_many(models).exec(&txn).await?;
        }

        txn.commit().await?;

        debug!(table = R::DOMAIN.table(), %location_id, rows = count, "Stored batch");
        Ok(())
    }
}
