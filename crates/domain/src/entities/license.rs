//! License aggregate - a permit granting a licensee the use of a package
//!
//! The aggregate tracks issuance, lifecycle details (expiration,
//! cancellation, renewal), the current assignment, and the full history of
//! previous assignments. Mutations happen in memory only; persisting the
//! result is the calling service's responsibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{LicenseAssignment, Package};
use crate::value_objects::{AccountId, LicenseId, Licensee, SubscriptionId};

/// Default reason stamped on newly issued licenses
const DEFAULT_ISSUANCE_REASON: &str = "New Logo";

/// Why and when a license was issued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceDetail {
    pub issued_at: DateTime<Utc>,
    /// Issuance reason, e.g. new logo, expansion, renewal of another license
    pub reason: String,
}

/// When a license expired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationDetail {
    pub expired_at: DateTime<Utc>,
}

/// When a license was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetail {
    pub cancelled_at: DateTime<Utc>,
}

/// Renewal of a license into a successor license
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalDetail {
    /// License this one renewed into
    pub renewed_to: LicenseId,
    pub renewed_at: DateTime<Utc>,
    pub reason: String,
}

/// A permit granting a licensee the permission to use a package's capabilities
///
/// Possessed by one customer account and governed by one subscription. The
/// identifier is generated at issuance and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    id: LicenseId,
    licensed_package: Package,
    possessing_account_id: AccountId,
    governing_subscription_id: SubscriptionId,
    issuance: Option<IssuanceDetail>,
    expiration: Option<ExpirationDetail>,
    cancellation: Option<CancellationDetail>,
    renewal: Option<RenewalDetail>,
    current_assignment: Option<LicenseAssignment>,
    previous_assignments: Vec<LicenseAssignment>,
    is_trial: bool,
}

impl License {
    /// Issue a new license of the given package to a customer account
    ///
    /// The license gets a fresh unique identifier, an issuance detail
    /// stamped with the current time and the default reason, no assignment,
    /// and is not a trial.
    pub fn issue(
        account_id: AccountId,
        subscription_id: SubscriptionId,
        package: Package,
    ) -> Self {
        Self {
            id: LicenseId::new(),
            licensed_package: package,
            possessing_account_id: account_id,
            governing_subscription_id: subscription_id,
            issuance: Some(IssuanceDetail {
                issued_at: Utc::now(),
                reason: DEFAULT_ISSUANCE_REASON.to_string(),
            }),
            expiration: None,
            cancellation: None,
            renewal: None,
            current_assignment: None,
            previous_assignments: Vec::new(),
            is_trial: false,
        }
    }

    /// Mark this license as a trial license
    pub const fn as_trial(mut self) -> Self {
        self.is_trial = true;
        self
    }

    /// The license identifier
    pub const fn id(&self) -> LicenseId {
        self.id
    }

    /// The package this license grants
    pub const fn licensed_package(&self) -> &Package {
        &self.licensed_package
    }

    /// The customer account possessing this license
    pub const fn possessing_account_id(&self) -> &AccountId {
        &self.possessing_account_id
    }

    /// The subscription governing this license's lifecycle
    pub const fn governing_subscription_id(&self) -> &SubscriptionId {
        &self.governing_subscription_id
    }

    /// Issuance detail, if this license has been issued
    pub const fn issuance(&self) -> Option<&IssuanceDetail> {
        self.issuance.as_ref()
    }

    /// Renewal detail, if this license has been renewed into a successor
    pub const fn renewal(&self) -> Option<&RenewalDetail> {
        self.renewal.as_ref()
    }

    /// Whether this license is a trial license
    pub const fn is_trial(&self) -> bool {
        self.is_trial
    }

    /// Active means neither cancelled, expired, nor renewed away
    pub const fn is_active(&self) -> bool {
        self.cancellation.is_none() && self.expiration.is_none() && self.renewal.is_none()
    }

    /// Whether this license is currently assigned to a licensee
    pub const fn is_assigned(&self) -> bool {
        self.current_assignment.is_some()
    }

    /// The currently assigned licensee, if any
    pub fn assigned_licensee(&self) -> Option<&Licensee> {
        self.current_assignment
            .as_ref()
            .map(LicenseAssignment::assignee)
    }

    /// The current assignment record, if any
    pub const fn current_assignment(&self) -> Option<&LicenseAssignment> {
        self.current_assignment.as_ref()
    }

    /// Superseded assignments, oldest first
    pub fn previous_assignments(&self) -> &[LicenseAssignment] {
        &self.previous_assignments
    }

    /// Assign this license to a licensee
    ///
    /// Any existing assignment is closed and archived into the history
    /// before the new one is installed; no assignment record is ever
    /// discarded. Always succeeds.
    pub fn assign(&mut self, licensee: Licensee) {
        self.archive_current_assignment();
        self.current_assignment = Some(LicenseAssignment::now(licensee));
    }

    /// Remove the current assignment, archiving it into the history
    ///
    /// No-op if the license is already unassigned.
    pub fn unassign(&mut self) {
        self.archive_current_assignment();
    }

    fn archive_current_assignment(&mut self) {
        if let Some(mut assignment) = self.current_assignment.take() {
            assignment.close(Utc::now());
            self.previous_assignments.push(assignment);
        }
    }

    /// Record that this license expired at the current time
    pub fn expire(&mut self) {
        self.expiration = Some(ExpirationDetail {
            expired_at: Utc::now(),
        });
    }

    /// Record that this license was cancelled at the current time
    pub fn cancel(&mut self) {
        self.cancellation = Some(CancellationDetail {
            cancelled_at: Utc::now(),
        });
    }

    /// Record that this license renewed into a successor license
    pub fn renew_to(&mut self, successor: LicenseId, reason: impl Into<String>) {
        self.renewal = Some(RenewalDetail {
            renewed_to: successor,
            renewed_at: Utc::now(),
            reason: reason.into(),
        });
    }
}

impl std::fmt::Display for License {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{id={}, account={}, subscription={}, package={}, assignee={}, previous_assignments={}}}",
            self.id,
            self.possessing_account_id,
            self.governing_subscription_id,
            self.licensed_package.id(),
            self.assigned_licensee()
                .map_or_else(|| "none".to_string(), |l| l.licensee_id().to_string()),
            self.previous_assignments.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Capability;

    fn sample_package() -> Package {
        Package::new(
            "pkg:base-optimize-2022",
            "Optimize",
            [Capability::new("cpb:sequence", "Sequence")],
        )
    }

    fn issued_license() -> License {
        License::issue(
            AccountId::new("acc-1"),
            SubscriptionId::new("sub-1"),
            sample_package(),
        )
    }

    #[test]
    fn issued_license_is_active_and_unassigned() {
        let license = issued_license();
        assert!(license.is_active());
        assert!(!license.is_assigned());
        assert!(!license.is_trial());
        assert!(license.assigned_licensee().is_none());
        assert!(license.previous_assignments().is_empty());
        let issuance = license.issuance().unwrap();
        assert_eq!(issuance.reason, "New Logo");
        assert!(issuance.issued_at <= Utc::now());
    }

    #[test]
    fn issued_licenses_get_unique_ids() {
        assert_ne!(issued_license().id(), issued_license().id());
    }

    #[test]
    fn assign_installs_current_assignment() {
        let mut license = issued_license();
        license.assign(Licensee::instance_user("ins-101", "usr-alice"));
        assert!(license.is_assigned());
        assert_eq!(
            license.assigned_licensee().unwrap().licensee_id().as_str(),
            "INSTANCE_USER:ins-101/usr-alice"
        );
        assert!(license.previous_assignments().is_empty());
    }

    #[test]
    fn reassign_archives_prior_assignment() {
        let mut license = issued_license();
        license.assign(Licensee::instance_user("ins-101", "usr-alice"));
        license.assign(Licensee::instance_user("ins-101", "usr-bob"));

        assert!(license.is_assigned());
        assert_eq!(
            license.assigned_licensee().unwrap().licensee_id().as_str(),
            "INSTANCE_USER:ins-101/usr-bob"
        );
        assert_eq!(license.previous_assignments().len(), 1);
        let archived = &license.previous_assignments()[0];
        assert_eq!(
            archived.assignee().licensee_id().as_str(),
            "INSTANCE_USER:ins-101/usr-alice"
        );
        assert!(!archived.is_current());
    }

    #[test]
    fn history_grows_by_one_per_reassignment() {
        let mut license = issued_license();
        for i in 0..5 {
            license.assign(Licensee::instance_user("ins-101", format!("usr-{i}")));
        }
        assert_eq!(license.previous_assignments().len(), 4);
    }

    #[test]
    fn unassign_archives_and_clears() {
        let mut license = issued_license();
        license.assign(Licensee::instance_user("ins-101", "usr-alice"));
        license.unassign();
        assert!(!license.is_assigned());
        assert!(license.assigned_licensee().is_none());
        assert_eq!(license.previous_assignments().len(), 1);
    }

    #[test]
    fn unassign_without_assignment_is_noop() {
        let mut license = issued_license();
        license.unassign();
        assert!(!license.is_assigned());
        assert!(license.previous_assignments().is_empty());
    }

    #[test]
    fn expired_license_is_not_active() {
        let mut license = issued_license();
        license.expire();
        assert!(!license.is_active());
    }

    #[test]
    fn cancelled_license_is_not_active() {
        let mut license = issued_license();
        license.cancel();
        assert!(!license.is_active());
    }

    #[test]
    fn renewed_license_is_not_active_and_points_to_successor() {
        let mut license = issued_license();
        let successor = LicenseId::new();
        license.renew_to(successor, "Annual renewal");
        assert!(!license.is_active());
        let renewal = license.renewal().unwrap();
        assert_eq!(renewal.renewed_to, successor);
        assert_eq!(renewal.reason, "Annual renewal");
    }

    #[test]
    fn trial_flag() {
        let license = issued_license().as_trial();
        assert!(license.is_trial());
    }

    #[test]
    fn display_names_package_and_assignee() {
        let mut license = issued_license();
        license.assign(Licensee::instance_user("ins-101", "usr-alice"));
        let rendered = license.to_string();
        assert!(rendered.contains("pkg:base-optimize-2022"));
        assert!(rendered.contains("INSTANCE_USER:ins-101/usr-alice"));
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut license = issued_license();
        license.assign(Licensee::instance_user("ins-101", "usr-alice"));
        license.assign(Licensee::instance_user("ins-101", "usr-bob"));

        let json = serde_json::to_string(&license).unwrap();
        let back: License = serde_json::from_str(&json).unwrap();
        assert_eq!(back, license);
        assert_eq!(back.id(), license.id());
        assert_eq!(back.previous_assignments().len(), 1);
    }
}
