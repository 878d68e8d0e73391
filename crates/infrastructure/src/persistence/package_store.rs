//! SQLite-based package persistence
//!
//! Packages are reference data: seeded once (usually from the standard
//! catalog) and read by id afterwards.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::PackageStore;
use async_trait::async_trait;
use domain::entities::Package;
use domain::value_objects::PackageId;
use rusqlite::{OptionalExtension, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based package store
#[derive(Debug, Clone)]
pub struct SqlitePackageStore {
    pool: Arc<ConnectionPool>,
}

impl SqlitePackageStore {
    /// Create a new SQLite package store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Insert or replace a package (seeding/catalog refresh)
    pub async fn upsert(&self, package: &Package) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let package = package.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Storage(e.to_string()))?;

            let body = serde_json::to_string(&package)
                .map_err(|e| ApplicationError::Storage(e.to_string()))?;

            conn.execute(
                "INSERT OR REPLACE INTO packages (id, body) VALUES (?1, ?2)",
                params![package.id().as_str(), body],
            )
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;

            debug!(package_id = %package.id(), "Upserted package");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    /// Seed every package of an iterator (e.g. the standard catalog)
    pub async fn seed(
        &self,
        packages: impl IntoIterator<Item = Package> + Send,
    ) -> Result<(), ApplicationError> {
        for package in packages {
            self.upsert(&package).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PackageStore for SqlitePackageStore {
    #[instrument(skip(self), fields(package_id = %id))]
    async fn get(&self, id: &PackageId) -> Result<Option<Package>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id = id.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Storage(e.to_string()))?;

            let body: Option<String> = conn
                .query_row(
                    "SELECT body FROM packages WHERE id = ?1",
                    [id.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| ApplicationError::Storage(e.to_string()))?;

            body.map(|body| {
                serde_json::from_str(&body)
                    .map_err(|e| ApplicationError::Storage(e.to_string()))
            })
            .transpose()
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
