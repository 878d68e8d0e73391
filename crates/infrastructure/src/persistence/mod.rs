//! Persistence adapters
//!
//! SQLite implementations of the license and package store ports, plus
//! in-memory equivalents for tests and local development.

mod connection;
mod license_store;
mod memory;
mod migrations;
mod package_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use license_store::SqliteLicenseStore;
pub use memory::{InMemoryLicenseStore, InMemoryPackageStore};
pub use migrations::run_migrations;
pub use package_store::SqlitePackageStore;
