//! Port definitions for the application layer
//!
//! Ports are the storage interfaces the licensing use cases depend on.
//! Adapters in the infrastructure layer implement them (SQLite for
//! production, in-memory for tests and local development).

mod license_store;
mod package_store;

pub use license_store::LicenseStore;
#[cfg(test)]
pub use license_store::MockLicenseStore;
pub use package_store::PackageStore;
#[cfg(test)]
pub use package_store::MockPackageStore;
