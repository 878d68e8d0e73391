//! Packaging plan - a versioned set of supported packages
//!
//! Subscriptions subscribe to one packaging plan; versioning the plan is
//! what enables grandfathering older package lineups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Package;
use crate::value_objects::PackageId;

/// A versioned plan aggregating the packages on offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingPlan {
    /// Plan identifier, e.g. `pkgplan:v2.3`
    id: String,
    major_version: u32,
    /// Revision within the major version ("3" in v2.3)
    revision: u32,
    created_at: DateTime<Utc>,
    supported_packages: Vec<Package>,
}

impl PackagingPlan {
    /// Create a packaging plan
    pub fn new(
        major_version: u32,
        revision: u32,
        supported_packages: impl IntoIterator<Item = Package>,
    ) -> Self {
        Self {
            id: format!("pkgplan:v{major_version}.{revision}"),
            major_version,
            revision,
            created_at: Utc::now(),
            supported_packages: supported_packages.into_iter().collect(),
        }
    }

    /// The plan identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Major version of the plan
    pub const fn major_version(&self) -> u32 {
        self.major_version
    }

    /// Revision within the major version
    pub const fn revision(&self) -> u32 {
        self.revision
    }

    /// When this plan was created
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Packages supported by this plan
    pub fn supported_packages(&self) -> &[Package] {
        &self.supported_packages
    }

    /// Whether the plan supports the given package
    pub fn supports_package(&self, package_id: &PackageId) -> bool {
        self.supported_packages
            .iter()
            .any(|package| package.id() == package_id)
    }
}
