//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the licensing domain
#[derive(Debug, Error)]
pub enum DomainError {
    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// No unassigned license is left for the requested package
    #[error("no unassigned license of package {package_id} for account {account_id}")]
    NoAvailableLicense {
        account_id: String,
        package_id: String,
    },

    /// License is possessed by a different customer account
    #[error("license {license_id} is not possessed by account {account_id}")]
    AccountMismatch {
        license_id: String,
        account_id: String,
    },

    /// Encoded licensee identifier could not be parsed
    #[error("invalid licensee identifier: {0}")]
    InvalidLicensee(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("License", "lic-123");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "License");
                assert_eq!(id, "lic-123");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("Package", "pkg:unknown");
        assert_eq!(err.to_string(), "Package not found: pkg:unknown");
    }

    #[test]
    fn no_available_license_message_names_package_and_account() {
        let err = DomainError::NoAvailableLicense {
            account_id: "acc-1".to_string(),
            package_id: "pkg:base-optimize-2022".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("pkg:base-optimize-2022"));
        assert!(message.contains("acc-1"));
    }

    #[test]
    fn account_mismatch_message() {
        let err = DomainError::AccountMismatch {
            license_id: "lic-1".to_string(),
            account_id: "acc-2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "license lic-1 is not possessed by account acc-2"
        );
    }

    #[test]
    fn invalid_licensee_message() {
        let err = DomainError::InvalidLicensee("BOGUS:x".to_string());
        assert!(err.to_string().contains("BOGUS:x"));
    }
}
