//! License storage port
//!
//! Defines the interface for persisting and querying license aggregates.

use async_trait::async_trait;
use domain::entities::License;
use domain::value_objects::{AccountId, LicenseId, Licensee, LicenseeId, PackageId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for license persistence operations
///
/// The store is the single source of truth for license state under
/// concurrency: callers never mutate a shared `License` in place and assume
/// visibility without going through `update`. The read-modify-write of
/// claiming an unassigned license is therefore a single port operation,
/// implemented atomically by every adapter.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LicenseStore: Send + Sync {
    /// Persist a newly issued license
    async fn create(&self, license: &License) -> Result<(), ApplicationError>;

    /// Persist a batch of newly issued licenses atomically
    ///
    /// Either every license in the batch is persisted or none is.
    async fn create_many(&self, licenses: &[License]) -> Result<(), ApplicationError>;

    /// Persist the new state of an existing license
    async fn update(&self, license: &License) -> Result<(), ApplicationError>;

    /// Get a license by id
    async fn get(&self, id: LicenseId) -> Result<Option<License>, ApplicationError>;

    /// Find all licenses currently assigned to the given licensee
    ///
    /// Returns an empty vec when none are assigned.
    async fn find_by_assigned_licensee(
        &self,
        licensee_id: &LicenseeId,
    ) -> Result<Vec<License>, ApplicationError>;

    /// Atomically claim the next unassigned license of a package
    ///
    /// Selects an unassigned license of the package under the account,
    /// assigns it to the licensee, persists the result, and returns the
    /// assigned aggregate. At most one caller can claim a given license.
    /// Selection order is adapter-defined but stable within one snapshot of
    /// the store. Fails with [`domain::DomainError::NoAvailableLicense`]
    /// when every license of the package is already assigned.
    async fn claim_next_unassigned(
        &self,
        account_id: &AccountId,
        package_id: &PackageId,
        licensee: &Licensee,
    ) -> Result<License, ApplicationError>;

    /// Count unassigned licenses of a package under an account
    async fn count_unassigned(
        &self,
        account_id: &AccountId,
        package_id: &PackageId,
    ) -> Result<u64, ApplicationError>;
}
