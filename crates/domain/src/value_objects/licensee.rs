//! Licensee identity - who holds a license
//!
//! A licensee is either a user scoped to one instance, a user scoped to a
//! customer organization (visible across that organization's instances), or
//! a group. The variant set is closed; every dispatch here is exhaustive so
//! adding a variant forces every call site to be revisited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{InstanceId, LicenseeId};

/// The kind of identity holding a license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseeType {
    /// User defined within the namespace of one instance
    InstanceUser,
    /// User defined within a customer organization, spanning its instances
    OrganizationUser,
    /// A named group of users
    Group,
}

impl LicenseeType {
    /// Tag used as the prefix of encoded licensee identifiers
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::InstanceUser => "INSTANCE_USER",
            Self::OrganizationUser => "ORGANIZATION_USER",
            Self::Group => "GROUP",
        }
    }
}

impl fmt::Display for LicenseeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The holder of a license
///
/// Each variant encodes a globally unique licensee identifier from its
/// scoping identifiers. The encoding is pure and deterministic: the same
/// scoping inputs always produce the same identifier, and the variant tag
/// prefix keeps encodings collision-free across variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Licensee {
    /// User scoped to one instance
    InstanceUser {
        instance_id: InstanceId,
        /// User id within the instance namespace
        user_id: String,
    },
    /// User scoped to a customer organization
    OrganizationUser {
        organization_id: String,
        /// User id within the organization namespace
        user_id: String,
        /// Contact address, carried for display only; not part of the identity
        email: Option<String>,
    },
    /// A group of users
    Group { group_id: String },
}

impl Licensee {
    /// Create an instance-scoped user licensee
    pub fn instance_user(instance_id: impl Into<InstanceId>, user_id: impl Into<String>) -> Self {
        Self::InstanceUser {
            instance_id: instance_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Create an organization-scoped user licensee
    pub fn organization_user(
        organization_id: impl Into<String>,
        user_id: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self::OrganizationUser {
            organization_id: organization_id.into(),
            user_id: user_id.into(),
            email,
        }
    }

    /// Create a group licensee
    pub fn group(group_id: impl Into<String>) -> Self {
        Self::Group {
            group_id: group_id.into(),
        }
    }

    /// Encode the globally unique licensee identifier
    pub fn licensee_id(&self) -> LicenseeId {
        let encoded = match self {
            Self::InstanceUser {
                instance_id,
                user_id,
            } => format!("{}:{instance_id}/{user_id}", LicenseeType::InstanceUser.tag()),
            Self::OrganizationUser {
                organization_id,
                user_id,
                ..
            } => format!(
                "{}:{organization_id}/{user_id}",
                LicenseeType::OrganizationUser.tag()
            ),
            Self::Group { group_id } => format!("{}:{group_id}", LicenseeType::Group.tag()),
        };
        LicenseeId::new(encoded)
    }

    /// The kind of identity this licensee represents
    pub const fn licensee_type(&self) -> LicenseeType {
        match self {
            Self::InstanceUser { .. } => LicenseeType::InstanceUser,
            Self::OrganizationUser { .. } => LicenseeType::OrganizationUser,
            Self::Group { .. } => LicenseeType::Group,
        }
    }

    /// Whether this licensee is an individual user identity (not a group)
    pub const fn is_user_identity(&self) -> bool {
        match self {
            Self::InstanceUser { .. } | Self::OrganizationUser { .. } => true,
            Self::Group { .. } => false,
        }
    }

    /// Parse a licensee back from its encoded identifier
    ///
    /// Inverse of [`Self::licensee_id`]. The optional organization-user
    /// email is not part of the encoding and comes back as `None`.
    pub fn parse(encoded: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidLicensee(encoded.to_string());

        let (tag, body) = encoded.split_once(':').ok_or_else(invalid)?;
        match tag {
            "INSTANCE_USER" => {
                let (instance_id, user_id) = split_scoped(body).ok_or_else(invalid)?;
                Ok(Self::instance_user(instance_id, user_id))
            },
            "ORGANIZATION_USER" => {
                let (organization_id, user_id) = split_scoped(body).ok_or_else(invalid)?;
                Ok(Self::organization_user(organization_id, user_id, None))
            },
            "GROUP" => {
                if body.is_empty() {
                    return Err(invalid());
                }
                Ok(Self::group(body))
            },
            _ => Err(invalid()),
        }
    }
}

/// Split a `<scope>/<user>` body, rejecting empty parts
fn split_scoped(body: &str) -> Option<(&str, &str)> {
    let (scope, user) = body.split_once('/')?;
    if scope.is_empty() || user.is_empty() {
        return None;
    }
    Some((scope, user))
}

impl FromStr for Licensee {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Licensee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.licensee_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_user_encoding() {
        let licensee = Licensee::instance_user("ins-101", "usr-alice");
        assert_eq!(
            licensee.licensee_id().as_str(),
            "INSTANCE_USER:ins-101/usr-alice"
        );
        assert_eq!(licensee.licensee_type(), LicenseeType::InstanceUser);
        assert!(licensee.is_user_identity());
    }

    #[test]
    fn organization_user_encoding_includes_organization_scope() {
        let licensee = Licensee::organization_user("org-7", "usr-bob", None);
        assert_eq!(
            licensee.licensee_id().as_str(),
            "ORGANIZATION_USER:org-7/usr-bob"
        );
        assert!(licensee.is_user_identity());
    }

    #[test]
    fn group_encoding() {
        let licensee = Licensee::group("grp-sales");
        assert_eq!(licensee.licensee_id().as_str(), "GROUP:grp-sales");
        assert_eq!(licensee.licensee_type(), LicenseeType::Group);
        assert!(!licensee.is_user_identity());
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = Licensee::instance_user("ins-101", "usr-alice");
        let b = Licensee::instance_user("ins-101", "usr-alice");
        assert_eq!(a.licensee_id(), b.licensee_id());
    }

    #[test]
    fn variants_never_collide_on_same_scoping_inputs() {
        let instance = Licensee::instance_user("scope", "usr");
        let organization = Licensee::organization_user("scope", "usr", None);
        let group = Licensee::group("scope/usr");
        assert_ne!(instance.licensee_id(), organization.licensee_id());
        assert_ne!(instance.licensee_id(), group.licensee_id());
        assert_ne!(organization.licensee_id(), group.licensee_id());
    }

    #[test]
    fn parse_round_trips_instance_user() {
        let original = Licensee::instance_user("ins-101", "usr-alice");
        let parsed = Licensee::parse(original.licensee_id().as_str()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn parse_round_trips_group() {
        let original = Licensee::group("grp-sales");
        let parsed: Licensee = "GROUP:grp-sales".parse().unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn parse_drops_organization_user_email() {
        let original =
            Licensee::organization_user("org-7", "usr-bob", Some("bob@example.com".to_string()));
        let parsed = Licensee::parse(original.licensee_id().as_str()).unwrap();
        assert_eq!(
            parsed,
            Licensee::organization_user("org-7", "usr-bob", None)
        );
        assert_eq!(parsed.licensee_id(), original.licensee_id());
    }

    #[test]
    fn parse_rejects_unknown_tag() {
        assert!(Licensee::parse("ROBOT:r2/d2").is_err());
    }

    #[test]
    fn parse_rejects_malformed_bodies() {
        assert!(Licensee::parse("INSTANCE_USER:no-separator").is_err());
        assert!(Licensee::parse("INSTANCE_USER:/usr").is_err());
        assert!(Licensee::parse("ORGANIZATION_USER:org/").is_err());
        assert!(Licensee::parse("GROUP:").is_err());
        assert!(Licensee::parse("no-tag-at-all").is_err());
    }

    #[test]
    fn display_shows_encoded_id() {
        let licensee = Licensee::instance_user("ins-101", "usr-alice");
        assert_eq!(licensee.to_string(), "INSTANCE_USER:ins-101/usr-alice");
    }

    #[test]
    fn serialization_roundtrip() {
        let licensee =
            Licensee::organization_user("org-7", "usr-bob", Some("bob@example.com".to_string()));
        let json = serde_json::to_string(&licensee).unwrap();
        let back: Licensee = serde_json::from_str(&json).unwrap();
        assert_eq!(back, licensee);
    }
}
