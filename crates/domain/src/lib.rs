//! Domain layer for the licensing service
//!
//! Contains the licensing business logic: the license aggregate, package and
//! capability reference data, licensee identities, and domain errors. This
//! layer has no awareness of storage technology or transport.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
