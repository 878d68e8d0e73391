//! Capability - the smallest licensable feature unit

use serde::{Deserialize, Serialize};

use crate::value_objects::CapabilityId;

/// Descriptive upper bound on a capability's usage
///
/// Metadata only: the licensing service records the limit but never meters
/// usage or enforces the number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityLimit {
    /// The limit value, e.g. 250000
    pub limit: u64,
    /// Unit of the limit, e.g. "CallsPerDay"
    pub unit: String,
}

impl CapacityLimit {
    /// Create a capacity limit
    pub fn new(limit: u64, unit: impl Into<String>) -> Self {
        Self {
            limit,
            unit: unit.into(),
        }
    }
}

/// A unit of software functionality at which entitlement is evaluated
///
/// Capabilities are reference data: defined once by the package catalog and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    id: CapabilityId,
    display_name: String,
    capacity_limit: Option<CapacityLimit>,
}

impl Capability {
    /// Define a capability without a capacity limit
    pub fn new(id: impl Into<CapabilityId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            capacity_limit: None,
        }
    }

    /// Attach a descriptive capacity limit
    pub fn with_capacity_limit(mut self, limit: CapacityLimit) -> Self {
        self.capacity_limit = Some(limit);
        self
    }

    /// The capability identifier
    pub const fn id(&self) -> &CapabilityId {
        &self.id
    }

    /// Customer-facing display name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Descriptive capacity limit, if any
    pub const fn capacity_limit(&self) -> Option<&CapacityLimit> {
        self.capacity_limit.as_ref()
    }

    /// Whether this capability carries a capacity limit
    pub const fn has_capacity_limit(&self) -> bool {
        self.capacity_limit.is_some()
    }
}
