//! Package - a bundle of capabilities sold as one licensable unit

use serde::{Deserialize, Serialize};

use crate::entities::Capability;
use crate::value_objects::{CapabilityId, PackageId};

/// A bundle of capabilities as a licensable unit
///
/// Packages are reference data: constructed once from the catalog and never
/// mutated. The name is versioned in the id ("Optimize" in 2022 can differ
/// from "Optimize" in another year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    id: PackageId,
    name: String,
    included_capabilities: Vec<Capability>,
}

impl Package {
    /// Construct a package from its included capabilities
    ///
    /// Capability ids must be unique within a package; duplicates keep the
    /// first occurrence.
    pub fn new(
        id: impl Into<PackageId>,
        name: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        let mut included: Vec<Capability> = Vec::new();
        for capability in capabilities {
            if !included.iter().any(|c| c.id() == capability.id()) {
                included.push(capability);
            }
        }
        Self {
            id: id.into(),
            name: name.into(),
            included_capabilities: included,
        }
    }

    /// The package identifier
    pub const fn id(&self) -> &PackageId {
        &self.id
    }

    /// Readable package name, e.g. "Optimize"
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capabilities included in this package
    pub fn included_capabilities(&self) -> &[Capability] {
        &self.included_capabilities
    }

    /// Number of included capabilities
    pub fn capability_count(&self) -> usize {
        self.included_capabilities.len()
    }

    /// Whether this package includes the given capability
    ///
    /// Linear scan; package capability sets are small and static.
    pub fn includes_capability(&self, capability_id: &CapabilityId) -> bool {
        self.included_capabilities
            .iter()
            .any(|capability| capability.id() == capability_id)
    }
}
