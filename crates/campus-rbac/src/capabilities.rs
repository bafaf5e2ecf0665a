#![allow(clippy::match_same_arms)]
//! Capability policy table.
//!
//! Each named capability is granted to a fixed set of roles. The standard
//! mapping lives in [`STANDARD_CAPABILITIES`]; edit that table, not the
//! predicates, to change policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::has_any_of;
use crate::principal::Principal;
use crate::roles::{Role, RoleSet};

/// Named action a principal may be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Reach the administration area (user management).
    AccessAdmin,

    /// Create, edit and archive courses.
    ManageCourses,

    /// Create assignments within a course.
    CreateAssignments,

    /// Score submissions and leave feedback.
    GradeSubmissions,

    /// Enroll and drop students.
    ManageEnrollments,

    /// Read the audit trail (actor, action, before/after snapshots).
    ViewAuditLogs,

    /// Read course material and announcements.
    ViewCourseContent,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Capability::AccessAdmin,
        Capability::ManageCourses,
        Capability::CreateAssignments,
        Capability::GradeSubmissions,
        Capability::ManageEnrollments,
        Capability::ViewAuditLogs,
        Capability::ViewCourseContent,
    ];

    /// Returns the configuration name (`"manage-courses"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::AccessAdmin => "access-admin",
            Capability::ManageCourses => "manage-courses",
            Capability::CreateAssignments => "create-assignments",
            Capability::GradeSubmissions => "grade-submissions",
            Capability::ManageEnrollments => "manage-enrollments",
            Capability::ViewAuditLogs => "view-audit-logs",
            Capability::ViewCourseContent => "view-course-content",
        }
    }

    const fn index(self) -> usize {
        match self {
            Capability::AccessAdmin => 0,
            Capability::ManageCourses => 1,
            Capability::CreateAssignments => 2,
            Capability::GradeSubmissions => 3,
            Capability::ManageEnrollments => 4,
            Capability::ViewAuditLogs => 5,
            Capability::ViewCourseContent => 6,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known capability name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown capability: {0:?}")]
pub struct ParseCapabilityError(pub String);

impl FromStr for Capability {
    type Err = ParseCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|capability| capability.as_str() == s)
            .ok_or_else(|| ParseCapabilityError(s.to_string()))
    }
}

/// Standard capability policy.
///
/// | Capability            | Admin | Teacher | Student | Parent |
/// |-----------------------|-------|---------|---------|--------|
/// | `access-admin`        | ✓     | ✗       | ✗       | ✗      |
/// | `manage-courses`      | ✓     | ✓       | ✗       | ✗      |
/// | `create-assignments`  | ✓     | ✓       | ✗       | ✗      |
/// | `grade-submissions`   | ✓     | ✓       | ✗       | ✗      |
/// | `manage-enrollments`  | ✓     | ✓       | ✗       | ✗      |
/// | `view-audit-logs`     | ✓     | ✓       | ✗       | ✗      |
/// | `view-course-content` | ✓     | ✓       | ✓       | ✓      |
pub const STANDARD_CAPABILITIES: [(Capability, &[Role]); 7] = [
    (Capability::AccessAdmin, &[Role::Admin]),
    (Capability::ManageCourses, &[Role::Admin, Role::Teacher]),
    (Capability::CreateAssignments, &[Role::Admin, Role::Teacher]),
    (Capability::GradeSubmissions, &[Role::Admin, Role::Teacher]),
    (Capability::ManageEnrollments, &[Role::Admin, Role::Teacher]),
    (Capability::ViewAuditLogs, &[Role::Admin, Role::Teacher]),
    (
        Capability::ViewCourseContent,
        &[Role::Admin, Role::Teacher, Role::Student, Role::Parent],
    ),
];

/// Mapping from every [`Capability`] to the roles allowed to exercise it.
///
/// Admin is a member of every entry, whatever the table was built from.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CapabilityTable {
    allowed: [RoleSet; 7],
}

impl CapabilityTable {
    /// The standard policy, built from [`STANDARD_CAPABILITIES`].
    pub const STANDARD: CapabilityTable = CapabilityTable::from_entries(&STANDARD_CAPABILITIES);

    /// Builds a table from `(capability, roles)` entries.
    ///
    /// Capabilities without an entry are granted to admin only.
    pub const fn from_entries(entries: &[(Capability, &[Role])]) -> Self {
        let mut allowed = [RoleSet::empty().with(Role::Admin); 7];
        let mut i = 0;
        while i < entries.len() {
            let (capability, roles) = entries[i];
            allowed[capability.index()] = RoleSet::from_roles(roles).with(Role::Admin);
            i += 1;
        }
        Self { allowed }
    }

    /// Returns the roles allowed to exercise `capability`.
    pub const fn allowed_roles(&self, capability: Capability) -> RoleSet {
        self.allowed[capability.index()]
    }

    /// Returns a copy of this table with `capability` granted to `roles` and admin.
    pub fn with_allowed(mut self, capability: Capability, roles: impl Into<RoleSet>) -> Self {
        self.allowed[capability.index()] = roles.into().with(Role::Admin);
        self
    }

    /// Returns whether the principal holds any role allowed for `capability`.
    pub fn permits<'a>(
        &self,
        principal: impl Into<Option<&'a Principal>>,
        capability: Capability,
    ) -> bool {
        has_any_of(principal, self.allowed_roles(capability))
    }

    /// Returns every capability the principal may exercise.
    pub fn granted<'a>(&self, principal: impl Into<Option<&'a Principal>>) -> Vec<Capability> {
        let principal = principal.into();
        Capability::ALL
            .into_iter()
            .filter(|capability| self.permits(principal, *capability))
            .collect()
    }

    /// Iterates `(capability, allowed roles)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Capability, RoleSet)> + '_ {
        Capability::ALL
            .into_iter()
            .map(move |cap| (cap, self.allowed_roles(cap)))
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
