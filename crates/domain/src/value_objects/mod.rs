//! Value Objects - Immutable, identity-less domain primitives

mod entitlement;
mod identifiers;
mod license_id;
mod licensee;

pub use entitlement::Entitlement;
pub use identifiers::{AccountId, CapabilityId, InstanceId, LicenseeId, PackageId, SubscriptionId};
pub use license_id::LicenseId;
pub use licensee::{Licensee, LicenseeType};
