//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage adapter failure (connection, serialization, constraint)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check whether this error is a missing-aggregate lookup failure
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NotFound { .. }))
    }

    /// Check whether this error means no unassigned license was available
    pub const fn is_no_available_license(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NoAvailableLicense { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_is_detected() {
        let err = ApplicationError::from(DomainError::not_found("License", "lic-1"));
        assert!(err.is_not_found());
        assert!(!err.is_no_available_license());
    }

    #[test]
    fn no_available_license_is_detected() {
        let err = ApplicationError::from(DomainError::NoAvailableLicense {
            account_id: "acc-1".to_string(),
            package_id: "pkg:base-optimize-2022".to_string(),
        });
        assert!(err.is_no_available_license());
        assert!(!err.is_not_found());
    }

    #[test]
    fn storage_error_is_neither() {
        let err = ApplicationError::Storage("disk full".to_string());
        assert!(!err.is_not_found());
        assert!(!err.is_no_available_license());
    }

    #[test]
    fn domain_error_message_passes_through() {
        let err = ApplicationError::from(DomainError::not_found("Package", "pkg:x"));
        assert_eq!(err.to_string(), "Package not found: pkg:x");
    }
}
