//! Licensing Service - the use-case facade of the licensing business logic
//!
//! Each method represents one business use case. Driving adapters of any
//! kind (CLI, RPC handler, queue consumer) invoke this facade; the facade
//! loads aggregates through the storage ports, applies domain rules, and
//! persists mutations back through the same ports.

use std::sync::Arc;

use domain::entities::License;
use domain::value_objects::{
    AccountId, CapabilityId, Entitlement, InstanceId, LicenseId, Licensee, PackageId,
    SubscriptionId,
};
use domain::DomainError;
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{LicenseStore, PackageStore};

/// Service orchestrating license issuance, assignment, and entitlement
/// evaluation
pub struct LicensingService {
    licenses: Arc<dyn LicenseStore>,
    packages: Arc<dyn PackageStore>,
}

impl std::fmt::Debug for LicensingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicensingService").finish_non_exhaustive()
    }
}

impl LicensingService {
    /// Create a new licensing service
    pub fn new(licenses: Arc<dyn LicenseStore>, packages: Arc<dyn PackageStore>) -> Self {
        Self { licenses, packages }
    }

    /// Issue `count` new licenses of a package to a customer account under
    /// a subscription
    ///
    /// The batch persists all-or-nothing; a `count` of 0 returns an empty
    /// vec. Licenses are returned in creation order.
    #[instrument(skip(self), fields(account = %account_id, package = %package_id))]
    pub async fn issue_licenses(
        &self,
        account_id: &AccountId,
        subscription_id: &SubscriptionId,
        package_id: &PackageId,
        count: usize,
    ) -> Result<Vec<License>, ApplicationError> {
        let package = self
            .packages
            .get(package_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Package", package_id.as_str()))?;

        let licenses: Vec<License> = (0..count)
            .map(|_| {
                License::issue(
                    account_id.clone(),
                    subscription_id.clone(),
                    package.clone(),
                )
            })
            .collect();

        self.licenses.create_many(&licenses).await?;

        info!(count = licenses.len(), "Issued licenses");
        Ok(licenses)
    }

    /// Assign any available license of a package to an instance user
    ///
    /// The selection and assignment happen as one atomic store operation,
    /// so concurrent callers can never claim the same license. Fails with
    /// `NoAvailableLicense` when every license of the package is assigned.
    #[instrument(skip(self), fields(account = %account_id, package = %package_id))]
    pub async fn assign_available_license(
        &self,
        package_id: &PackageId,
        account_id: &AccountId,
        instance_id: &InstanceId,
        instance_user_id: &str,
    ) -> Result<License, ApplicationError> {
        let licensee = Licensee::instance_user(instance_id.clone(), instance_user_id);
        let license = self
            .licenses
            .claim_next_unassigned(account_id, package_id, &licensee)
            .await?;

        info!(license_id = %license.id(), licensee = %licensee, "Assigned available license");
        Ok(license)
    }

    /// Assign a specific license to an instance user
    ///
    /// The license must be possessed by the calling account; cross-account
    /// assignment is rejected. Reassignment archives the prior assignment
    /// into the license's history.
    #[instrument(skip(self), fields(license = %license_id, account = %account_id))]
    pub async fn assign_specific_license(
        &self,
        license_id: LicenseId,
        account_id: &AccountId,
        instance_id: &InstanceId,
        instance_user_id: &str,
    ) -> Result<License, ApplicationError> {
        let mut license = self
            .licenses
            .get(license_id)
            .await?
            .ok_or_else(|| DomainError::not_found("License", license_id.to_string()))?;

        if license.possessing_account_id() != account_id {
            return Err(DomainError::AccountMismatch {
                license_id: license_id.to_string(),
                account_id: account_id.to_string(),
            }
            .into());
        }

        let licensee = Licensee::instance_user(instance_id.clone(), instance_user_id);
        license.assign(licensee.clone());
        self.licenses.update(&license).await?;

        info!(licensee = %licensee, "Assigned specific license");
        Ok(license)
    }

    /// Count the unassigned licenses of a package possessed by an account
    ///
    /// Never fails on an empty result; no matching license means 0.
    #[instrument(skip(self), fields(account = %account_id, package = %package_id))]
    pub async fn count_unassigned_licenses(
        &self,
        account_id: &AccountId,
        package_id: &PackageId,
    ) -> Result<u64, ApplicationError> {
        self.licenses.count_unassigned(account_id, package_id).await
    }

    /// Verify that an instance user is entitled to a capability
    ///
    /// Entitlement is derived transitively: user → assigned licenses →
    /// licensed package → included capabilities. The first license whose
    /// package includes the capability grants the entitlement; licenses
    /// possessed by a different account are ignored. A user with no
    /// assigned license, or none whose package includes the capability, is
    /// not entitled.
    #[instrument(skip(self), fields(account = %account_id, capability = %capability_id))]
    pub async fn verify_entitlement(
        &self,
        account_id: &AccountId,
        instance_id: &InstanceId,
        instance_user_id: &str,
        capability_id: &CapabilityId,
    ) -> Result<Entitlement, ApplicationError> {
        let licensee = Licensee::instance_user(instance_id.clone(), instance_user_id);
        let licensee_id = licensee.licensee_id();

        let licenses = self
            .licenses
            .find_by_assigned_licensee(&licensee_id)
            .await?;

        for license in licenses
            .iter()
            .filter(|license| license.possessing_account_id() == account_id)
        {
            if license.licensed_package().includes_capability(capability_id) {
                debug!(license_id = %license.id(), "Entitlement granted");
                return Ok(Entitlement::granted(licensee_id, capability_id.clone()));
            }
        }

        debug!(licensee = %licensee_id, "Entitlement denied");
        Ok(Entitlement::denied(licensee_id, capability_id.clone()))
    }
}
