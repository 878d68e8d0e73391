//! Infrastructure layer - Adapters for the licensing service
//!
//! Implements the storage ports defined in the application layer (SQLite
//! and in-memory) and carries the operational concerns: configuration,
//! telemetry, and the seeded package catalog.

pub mod catalog;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, DatabaseConfig, Environment, TelemetryConfig};
pub use persistence::{
    ConnectionPool, DatabaseError, InMemoryLicenseStore, InMemoryPackageStore, SqliteLicenseStore,
    SqlitePackageStore, create_pool,
};
pub use telemetry::init_telemetry;
