//! Application services - Use case implementations

mod licensing_service;

pub use licensing_service::LicensingService;
