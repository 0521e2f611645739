use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::LocationId;
use crate::models::{DomainRecord, Location, NewLocation};

pub mod migrator;
pub mod repositories;

/// Persistence handle shared by the resolver and the record caches.
///
/// Cloning is cheap; every clone shares the same connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each in-memory connection is its own database, so pin the pool to one.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn record_repo(&self) -> repositories::records::RecordRepository {
        repositories::records::RecordRepository::new(self.conn.clone())
    }

    pub async fn find_location(&self, search_query: &str) -> Result<Option<Location>> {
        self.location_repo().find_by_query(search_query).await
    }

    /// Stores a geocoded location, returning the stored row. A concurrent
    /// insert of the same query yields the row that won.
    pub async fn insert_location(&self, location: &NewLocation) -> Result<Location> {
        self.location_repo().insert(location).await
    }

    pub async fn count_locations(&self) -> Result<u64> {
        self.location_repo().count().await
    }

    /// Every stored record of `R` for a location, in insertion order.
    pub async fn list_records<R: DomainRecord>(&self, location_id: LocationId) -> Result<Vec<R>> {
        self.record_repo().list(location_id).await
    }

    /// Atomically swaps a location's batch: optionally deletes the old rows,
    /// then inserts `records`, all in one transaction.
    pub async fn replace_records<R: DomainRecord>(
        &self,
        location_id: LocationId,
        records: Vec<R>,
        invalidate: bool,
    ) -> Result<()> {
        self.record_repo()
            .replace(location_id, records, invalidate)
            .await
    }
}
