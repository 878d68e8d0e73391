//! Package storage port
//!
//! Packages are reference data seeded from the catalog; the application
//! layer only ever resolves them by id.

use async_trait::async_trait;
use domain::entities::Package;
use domain::value_objects::PackageId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for package lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PackageStore: Send + Sync {
    /// Get a package by id
    async fn get(&self, id: &PackageId) -> Result<Option<Package>, ApplicationError>;
}
