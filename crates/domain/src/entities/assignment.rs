//! License assignment - the fact and timing of binding a license to a licensee

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Licensee;

/// One assignment of a license to a licensee
///
/// While current, `unassigned_at` is `None`. When the assignment is
/// superseded or the license is explicitly unassigned, the record is closed
/// and moved into the license's assignment history; it is never discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseAssignment {
    assignee: Licensee,
    assigned_at: DateTime<Utc>,
    unassigned_at: Option<DateTime<Utc>>,
}

impl LicenseAssignment {
    /// Start a new assignment stamped with the current time
    pub fn now(assignee: Licensee) -> Self {
        Self {
            assignee,
            assigned_at: Utc::now(),
            unassigned_at: None,
        }
    }

    /// The assigned licensee
    pub const fn assignee(&self) -> &Licensee {
        &self.assignee
    }

    /// When the licensee was assigned
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// When the assignment ended; `None` while current
    pub const fn unassigned_at(&self) -> Option<DateTime<Utc>> {
        self.unassigned_at
    }

    /// Whether this assignment is still in effect
    pub const fn is_current(&self) -> bool {
        self.unassigned_at.is_none()
    }

    /// Close the assignment at the given instant
    pub(crate) fn close(&mut self, at: DateTime<Utc>) {
        self.unassigned_at = Some(at);
    }
}
