//! Opaque string identifiers supplied by external systems
//!
//! Account, subscription, package, capability, and instance identifiers are
//! minted outside this service (billing, provisioning, the package catalog)
//! and are treated as opaque keys. [`LicenseeId`] is the one identifier
//! encoded by this domain; see [`crate::value_objects::Licensee`] for the
//! encoding rules.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier; surrounding whitespace is trimmed
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into().trim().to_string())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

opaque_id! {
    /// Customer account possessing licenses, e.g. `acc-1`
    AccountId
}

opaque_id! {
    /// Subscription governing a license's lifecycle, e.g. `sub-1`
    SubscriptionId
}

opaque_id! {
    /// Package catalog identifier, e.g. `pkg:base-optimize-2022`
    PackageId
}

opaque_id! {
    /// Capability identifier, e.g. `cpb:sequence`
    CapabilityId
}

opaque_id! {
    /// Instance (deployment namespace) identifier, e.g. `ins-101`
    InstanceId
}

opaque_id! {
    /// Encoded licensee identifier, e.g. `INSTANCE_USER:ins-101/usr-alice`
    ///
    /// Produced by [`crate::value_objects::Licensee::licensee_id`]; stable
    /// and collision-free across licensee variants, which makes it usable
    /// as the lookup key for "licenses assigned to this licensee".
    LicenseeId
}
