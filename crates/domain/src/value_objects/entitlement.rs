//! Entitlement evaluation result

use serde::{Deserialize, Serialize};

use crate::value_objects::{CapabilityId, LicenseeId};

/// The outcome of one entitlement evaluation
///
/// A snapshot of "is this user allowed to use this capability right now".
/// It is returned to the caller and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Whether the evaluated licensee may use the evaluated capability
    pub is_entitled: bool,
    /// Whether the licensee holds the feature but exceeds its capacity limit.
    /// Capacity limits are descriptive metadata in this scope, so this is
    /// always false today; kept so the result shape matches the evaluation
    /// the product defines.
    pub entitled_but_exceeds_capacity: bool,
    /// Licensee identifier the evaluation ran for
    pub evaluated_licensee_id: LicenseeId,
    /// Capability identifier the evaluation ran for
    pub evaluated_capability_id: CapabilityId,
}

impl Entitlement {
    /// An entitlement grant
    pub const fn granted(licensee_id: LicenseeId, capability_id: CapabilityId) -> Self {
        Self {
            is_entitled: true,
            entitled_but_exceeds_capacity: false,
            evaluated_licensee_id: licensee_id,
            evaluated_capability_id: capability_id,
        }
    }

    /// An entitlement denial
    pub const fn denied(licensee_id: LicenseeId, capability_id: CapabilityId) -> Self {
        Self {
            is_entitled: false,
            entitled_but_exceeds_capacity: false,
            evaluated_licensee_id: licensee_id,
            evaluated_capability_id: capability_id,
        }
    }
}
