//! Domain entities - Objects with identity and lifecycle

mod assignment;
mod capability;
mod license;
mod package;
mod packaging_plan;

pub use assignment::LicenseAssignment;
pub use capability::{Capability, CapacityLimit};
pub use license::{
    CancellationDetail, ExpirationDetail, IssuanceDetail, License, RenewalDetail,
};
pub use package::Package;
pub use packaging_plan::PackagingPlan;
