//! SQLite-based license persistence
//!
//! The aggregate is stored as a JSON document; the identifiers the queries
//! filter on (account, package, assigned licensee) are duplicated into
//! indexed columns and kept in sync on every write.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::LicenseStore;
use async_trait::async_trait;
use domain::DomainError;
use domain::entities::License;
use domain::value_objects::{AccountId, LicenseId, Licensee, LicenseeId, PackageId};
use rusqlite::{OptionalExtension, TransactionBehavior, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based license store
#[derive(Debug, Clone)]
pub struct SqliteLicenseStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteLicenseStore {
    /// Create a new SQLite license store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn to_body(license: &License) -> Result<String, ApplicationError> {
    serde_json::to_string(license).map_err(|e| ApplicationError::Storage(e.to_string()))
}

fn from_body(body: &str) -> Result<License, ApplicationError> {
    serde_json::from_str(body).map_err(|e| ApplicationError::Storage(e.to_string()))
}

fn assigned_licensee_column(license: &License) -> Option<String> {
    license
        .assigned_licensee()
        .map(|licensee| licensee.licensee_id().to_string())
}

fn storage_err(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Storage(e.to_string())
}

fn join_err(e: task::JoinError) -> ApplicationError {
    ApplicationError::Internal(e.to_string())
}

#[async_trait]
impl LicenseStore for SqliteLicenseStore {
    #[instrument(skip(self, license), fields(license_id = %license.id()))]
    async fn create(&self, license: &License) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let license = license.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_err)?;

            conn.execute(
                "INSERT INTO licenses (id, account_id, package_id, assigned_licensee_id, body)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    license.id().to_string(),
                    license.possessing_account_id().as_str(),
                    license.licensed_package().id().as_str(),
                    assigned_licensee_column(&license),
                    to_body(&license)?,
                ],
            )
            .map_err(storage_err)?;

            debug!("Created license");
            Ok(())
        })
        .await
        .map_err(join_err)?
    }

    #[instrument(skip(self, licenses), fields(count = licenses.len()))]
    async fn create_many(&self, licenses: &[License]) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let licenses = licenses.to_vec();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(storage_err)?;
            let tx = conn.transaction().map_err(storage_err)?;

            for license in &licenses {
                tx.execute(
                    "INSERT INTO licenses (id, account_id, package_id, assigned_licensee_id, body)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        license.id().to_string(),
                        license.possessing_account_id().as_str(),
                        license.licensed_package().id().as_str(),
                        assigned_licensee_column(license),
                        to_body(license)?,
                    ],
                )
                .map_err(storage_err)?;
            }

            tx.commit().map_err(storage_err)?;
            debug!("Created license batch");
            Ok(())
        })
        .await
        .map_err(join_err)?
    }

    #[instrument(skip(self, license), fields(license_id = %license.id()))]
    async fn update(&self, license: &License) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let license = license.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_err)?;

            let affected = conn
                .execute(
                    "UPDATE licenses SET assigned_licensee_id = ?1, body = ?2 WHERE id = ?3",
                    params![
                        assigned_licensee_column(&license),
                        to_body(&license)?,
                        license.id().to_string(),
                    ],
                )
                .map_err(storage_err)?;

            if affected == 0 {
                return Err(
                    DomainError::not_found("License", license.id().to_string()).into()
                );
            }
            Ok(())
        })
        .await
        .map_err(join_err)?
    }

    #[instrument(skip(self), fields(license_id = %id))]
    async fn get(&self, id: LicenseId) -> Result<Option<License>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_err)?;

            let body: Option<String> = conn
                .query_row(
                    "SELECT body FROM licenses WHERE id = ?1",
                    [&id_str],
                    |row| row.get(0),
                )
                .optional()
                .map_err(storage_err)?;

            body.as_deref().map(from_body).transpose()
        })
        .await
        .map_err(join_err)?
    }

    #[instrument(skip(self), fields(licensee = %licensee_id))]
    async fn find_by_assigned_licensee(
        &self,
        licensee_id: &LicenseeId,
    ) -> Result<Vec<License>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let licensee_id = licensee_id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_err)?;

            let mut stmt = conn
                .prepare(
                    "SELECT body FROM licenses WHERE assigned_licensee_id = ?1 ORDER BY id",
                )
                .map_err(storage_err)?;

            let bodies = stmt
                .query_map([&licensee_id], |row| row.get::<_, String>(0))
                .map_err(storage_err)?
                .collect::<Result<Vec<String>, _>>()
                .map_err(storage_err)?;

            bodies.iter().map(|body| from_body(body)).collect()
        })
        .await
        .map_err(join_err)?
    }

    #[instrument(skip(self, licensee), fields(account = %account_id, package = %package_id))]
    async fn claim_next_unassigned(
        &self,
        account_id: &AccountId,
        package_id: &PackageId,
        licensee: &Licensee,
    ) -> Result<License, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let account_id = account_id.clone();
        let package_id = package_id.clone();
        let licensee = licensee.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(storage_err)?;
            // immediate transaction takes the write lock before the select,
            // so two claimants cannot pick the same row
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(storage_err)?;

            let body: Option<String> = tx
                .query_row(
                    "SELECT body FROM licenses
                     WHERE account_id = ?1 AND package_id = ?2
                       AND assigned_licensee_id IS NULL
                     ORDER BY id LIMIT 1",
                    params![account_id.as_str(), package_id.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(storage_err)?;

            let Some(body) = body else {
                return Err(DomainError::NoAvailableLicense {
                    account_id: account_id.to_string(),
                    package_id: package_id.to_string(),
                }
                .into());
            };

            let mut license = from_body(&body)?;
            license.assign(licensee);

            tx.execute(
                "UPDATE licenses SET assigned_licensee_id = ?1, body = ?2 WHERE id = ?3",
                params![
                    assigned_licensee_column(&license),
                    to_body(&license)?,
                    license.id().to_string(),
                ],
            )
            .map_err(storage_err)?;

            tx.commit().map_err(storage_err)?;
            debug!(license_id = %license.id(), "Claimed unassigned license");
            Ok(license)
        })
        .await
        .map_err(join_err)?
    }

    #[instrument(skip(self), fields(account = %account_id, package = %package_id))]
    async fn count_unassigned(
        &self,
        account_id: &AccountId,
        package_id: &PackageId,
    ) -> Result<u64, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let account_id = account_id.clone();
        let package_id = package_id.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_err)?;

            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM licenses
                     WHERE account_id = ?1 AND package_id = ?2
                       AND assigned_licensee_id IS NULL",
                    params![account_id.as_str(), package_id.as_str()],
                    |row| row.get(0),
                )
                .map_err(storage_err)?;

            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
        .map_err(join_err)?
    }
}
