//! In-memory store adapters
//!
//! Map-backed implementations of the storage ports for tests and local
//! development. Claiming holds the write lock across the whole
//! select-assign-persist sequence, which gives the same at-most-one-claim
//! guarantee the SQLite adapter gets from its transaction.

use std::collections::HashMap;

use application::error::ApplicationError;
use application::ports::{LicenseStore, PackageStore};
use async_trait::async_trait;
use domain::DomainError;
use domain::entities::{License, Package};
use domain::value_objects::{AccountId, LicenseId, Licensee, LicenseeId, PackageId};
use parking_lot::RwLock;

/// In-memory license store
#[derive(Debug, Default)]
pub struct InMemoryLicenseStore {
    licenses: RwLock<HashMap<LicenseId, License>>,
}

impl InMemoryLicenseStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of licenses held (assigned or not)
    pub fn len(&self) -> usize {
        self.licenses.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.licenses.read().is_empty()
    }
}

fn matches_unassigned(license: &License, account_id: &AccountId, package_id: &PackageId) -> bool {
    license.possessing_account_id() == account_id
        && license.licensed_package().id() == package_id
        && !license.is_assigned()
}

#[async_trait]
impl LicenseStore for InMemoryLicenseStore {
    async fn create(&self, license: &License) -> Result<(), ApplicationError> {
        self.licenses.write().insert(license.id(), license.clone());
        Ok(())
    }

    async fn create_many(&self, licenses: &[License]) -> Result<(), ApplicationError> {
        let mut guard = self.licenses.write();
        for license in licenses {
            guard.insert(license.id(), license.clone());
        }
        Ok(())
    }

    async fn update(&self, license: &License) -> Result<(), ApplicationError> {
        let mut guard = self.licenses.write();
        if !guard.contains_key(&license.id()) {
            return Err(DomainError::not_found("License", license.id().to_string()).into());
        }
        guard.insert(license.id(), license.clone());
        Ok(())
    }

    async fn get(&self, id: LicenseId) -> Result<Option<License>, ApplicationError> {
        Ok(self.licenses.read().get(&id).cloned())
    }

    async fn find_by_assigned_licensee(
        &self,
        licensee_id: &LicenseeId,
    ) -> Result<Vec<License>, ApplicationError> {
        let mut found: Vec<License> = self
            .licenses
            .read()
            .values()
            .filter(|license| {
                license
                    .assigned_licensee()
                    .is_some_and(|licensee| licensee.licensee_id() == *licensee_id)
            })
            .cloned()
            .collect();
        found.sort_by_key(License::id);
        Ok(found)
    }

    async fn claim_next_unassigned(
        &self,
        account_id: &AccountId,
        package_id: &PackageId,
        licensee: &Licensee,
    ) -> Result<License, ApplicationError> {
        // one write-lock hold across select + assign + persist
        let mut guard = self.licenses.write();

        let id = guard
            .values()
            .filter(|license| matches_unassigned(license, account_id, package_id))
            .map(License::id)
            .min()
            .ok_or_else(|| DomainError::NoAvailableLicense {
                account_id: account_id.to_string(),
                package_id: package_id.to_string(),
            })?;

        let license = guard
            .get_mut(&id)
            .ok_or_else(|| ApplicationError::Internal("claimed license vanished".to_string()))?;
        license.assign(licensee.clone());
        Ok(license.clone())
    }

    async fn count_unassigned(
        &self,
        account_id: &AccountId,
        package_id: &PackageId,
    ) -> Result<u64, ApplicationError> {
        Ok(self
            .licenses
            .read()
            .values()
            .filter(|license| matches_unassigned(license, account_id, package_id))
            .count() as u64)
    }
}

/// In-memory package store
#[derive(Debug, Default)]
pub struct InMemoryPackageStore {
    packages: RwLock<HashMap<PackageId, Package>>,
}

impl InMemoryPackageStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given packages
    pub fn with_packages(packages: impl IntoIterator<Item = Package>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.packages.write();
            for package in packages {
                guard.insert(package.id().clone(), package);
            }
        }
        store
    }

    /// Insert or replace a package
    pub fn upsert(&self, package: Package) {
        self.packages.write().insert(package.id().clone(), package);
    }
}

#[async_trait]
impl PackageStore for InMemoryPackageStore {
    async fn get(&self, id: &PackageId) -> Result<Option<Package>, ApplicationError> {
        Ok(self.packages.read().get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use domain::value_objects::SubscriptionId;

    use super::*;
    use crate::catalog;

    fn issued(account: &str) -> License {
        License::issue(
            AccountId::new(account),
            SubscriptionId::new("sub-1"),
            catalog::optimize_2022(),
        )
    }

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let store = InMemoryLicenseStore::new();
        let license = issued("acc-1");
        store.create(&license).await.unwrap();
        let loaded = store.get(license.id()).await.unwrap().unwrap();
        assert_eq!(loaded, license);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = InMemoryLicenseStore::new();
        assert!(store.get(LicenseId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_license_fails() {
        let store = InMemoryLicenseStore::new();
        let license = issued("acc-1");
        let result = store.update(&license).await;
        assert!(result.is_err_and(|e| e.is_not_found()));
    }

    #[tokio::test]
    async fn claim_respects_account_and_package() {
        let store = InMemoryLicenseStore::new();
        store.create(&issued("acc-1")).await.unwrap();

        let licensee = Licensee::instance_user("ins-101", "usr-alice");
        let other_account = AccountId::new("acc-2");
        let package = PackageId::new("pkg:base-optimize-2022");

        let result = store
            .claim_next_unassigned(&other_account, &package, &licensee)
            .await;
        assert!(result.is_err_and(|e| e.is_no_available_license()));

        let claimed = store
            .claim_next_unassigned(&AccountId::new("acc-1"), &package, &licensee)
            .await
            .unwrap();
        assert!(claimed.is_assigned());
    }

    #[tokio::test]
    async fn package_store_seeding() {
        let store = InMemoryPackageStore::with_packages(catalog::standard_catalog());
        let package = store
            .get(&PackageId::new("pkg:base-optimize-2022"))
            .await
            .unwrap();
        assert!(package.is_some());
        assert!(
            store
                .get(&PackageId::new("pkg:unknown"))
                .await
                .unwrap()
                .is_none()
        );
    }
}
