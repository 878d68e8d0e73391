//! Application layer - Licensing use cases and storage ports
//!
//! Exposes the licensing service facade, organized by business use case,
//! and the port definitions the infrastructure layer implements. Driving
//! adapters (CLI, RPC handler, queue consumer) call the facade; it stays
//! unaware of how it is invoked.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
