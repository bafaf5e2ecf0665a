#![allow(clippy::match_same_arms)]
//! Role definitions for RBAC.
//!
//! Defines the 4 platform roles with a fixed privilege order:
//! - Parent: linked to one or more students (least privileged)
//! - Student: enrolled learner
//! - Teacher: owns and runs courses
//! - Admin: universal override (most privileged)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role in the access control system.
///
/// Roles are ordered from least to most privileged:
/// Parent < Student < Teacher < Admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Guardian of one or more students.
    ///
    /// **Access:**
    /// - View course content
    /// - View records of linked students only
    Parent,

    /// Enrolled learner.
    ///
    /// **Access:**
    /// - View course content
    /// - Own submissions and records
    Student,

    /// Course owner.
    ///
    /// **Access:**
    /// - Manage courses, assignments and enrollments
    /// - Grade submissions
    /// - View audit logs
    /// - Course-scoped access only for courses they teach
    Teacher,

    /// Platform administrator.
    ///
    /// Satisfies every role-gated check and every ownership check.
    Admin,
}

impl Role {
    /// All roles, highest priority first.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Teacher, Role::Student, Role::Parent];

    /// Returns the tie-break priority of this role (higher wins).
    ///
    /// This ordering is a fixed policy constant.
    pub const fn priority(self) -> u8 {
        match self {
            Role::Admin => 4,
            Role::Teacher => 3,
            Role::Student => 2,
            Role::Parent => 1,
        }
    }

    /// Returns the canonical wire name (`"ADMIN"`, `"TEACHER"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
            Role::Parent => "PARENT",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self.priority() - 1)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the canonical role names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0:?}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Parses a canonical role name. Matching is exact: `"admin"` and
    /// `"ROLE_ADMIN"` are both rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

/// Set of roles held by a principal or required by a check.
///
/// Backed by a bitmask keyed by [`Role`], so membership is O(1), duplicates
/// collapse and insertion order is irrelevant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Role>", from = "Vec<Role>")]
pub struct RoleSet {
    bits: u8,
}

impl RoleSet {
    /// Creates an empty role set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Creates a role set from a slice; usable in `const` tables.
    pub const fn from_roles(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        Self { bits }
    }

    /// Creates a role set containing every role.
    pub const fn all() -> Self {
        Self::from_roles(&Role::ALL)
    }

    /// Returns whether the role is a member of this set.
    pub const fn contains(&self, role: Role) -> bool {
        self.bits & role.bit() != 0
    }

    /// Adds a role to the set.
    pub fn insert(&mut self, role: Role) {
        self.bits |= role.bit();
    }

    /// Removes a role from the set.
    pub fn remove(&mut self, role: Role) {
        self.bits &= !role.bit();
    }

    /// Returns a copy of this set with `role` added.
    pub const fn with(self, role: Role) -> Self {
        Self {
            bits: self.bits | role.bit(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns whether the two sets share at least one role.
    pub const fn intersects(&self, other: RoleSet) -> bool {
        self.bits & other.bits != 0
    }

    /// Returns whether every role in `other` is also in `self`.
    pub const fn is_superset(&self, other: RoleSet) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Iterates the roles in the set, highest priority first.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        let set = *self;
        Role::ALL
            .into_iter()
            .filter(move |role| set.contains(*role))
    }

    /// Returns the member with the highest priority, if any.
    pub fn highest(&self) -> Option<Role> {
        self.iter().max_by_key(|role| role.priority())
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Canonical names, highest priority first: `[TEACHER, PARENT]`.
impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, role) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        f.write_str("]")
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl Extend<Role> for RoleSet {
    fn extend<I: IntoIterator<Item = Role>>(&mut self, iter: I) {
        for role in iter {
            self.insert(role);
        }
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet::empty().with(role)
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        RoleSet::from_roles(roles)
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        RoleSet::from_roles(&roles)
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(set: RoleSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_role_ordering() {
        // Enum ordering (derived Ord) follows privilege
        assert!(Role::Parent < Role::Student);
        assert!(Role::Student < Role::Teacher);
        assert!(Role::Teacher < Role::Admin);

        assert!(Role::Admin.priority() > Role::Teacher.priority());
        assert!(Role::Teacher.priority() > Role::Student.priority());
        assert!(Role::Student.priority() > Role::Parent.priority());
    }

    #[test_case(Role::Admin, 4; "admin")]
    #[test_case(Role::Teacher, 3; "teacher")]
    #[test_case(Role::Student, 2; "student")]
    #[test_case(Role::Parent, 1; "parent")]
    fn test_role_priority(role: Role, expected: u8) {
        assert_eq!(role.priority(), expected);
    }

    #[test_case("ADMIN" => Ok(Role::Admin); "admin")]
    #[test_case("TEACHER" => Ok(Role::Teacher); "teacher")]
    #[test_case("STUDENT" => Ok(Role::Student); "student")]
    #[test_case("PARENT" => Ok(Role::Parent); "parent")]
    #[test_case("admin" => Err(ParseRoleError("admin".to_string())); "lowercase rejected")]
    #[test_case("ROLE_ADMIN" => Err(ParseRoleError("ROLE_ADMIN".to_string())); "prefix rejected")]
    #[test_case("ADMINS" => Err(ParseRoleError("ADMINS".to_string())); "longer name rejected")]
    #[test_case("" => Err(ParseRoleError(String::new())); "empty rejected")]
    fn test_role_parse(input: &str) -> Result<Role, ParseRoleError> {
        input.parse()
    }

    #[test]
    fn test_role_display_round_trips_through_parse() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(
            serde_json::to_string(&Role::Teacher).unwrap(),
            "\"TEACHER\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"PARENT\"").unwrap(),
            Role::Parent
        );
        assert!(serde_json::from_str::<Role>("\"parent\"").is_err());
    }

    #[test]
    fn test_role_set_operations() {
        let mut set = RoleSet::empty();
        assert!(set.is_empty());
        assert!(!set.contains(Role::Student));

        set.insert(Role::Student);
        set.insert(Role::Student); // Duplicate insert is no-op
        assert_eq!(set.len(), 1);
        assert!(set.contains(Role::Student));

        set.insert(Role::Parent);
        assert_eq!(set.len(), 2);

        set.remove(Role::Student);
        assert!(!set.contains(Role::Student));
        assert!(set.contains(Role::Parent));
    }

    #[test]
    fn test_role_set_order_irrelevant() {
        let a = RoleSet::from([Role::Student, Role::Admin, Role::Parent]);
        let b = RoleSet::from([Role::Parent, Role::Student, Role::Admin, Role::Admin]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_role_set_intersects_and_superset() {
        let staff = RoleSet::from([Role::Admin, Role::Teacher]);
        let family = RoleSet::from([Role::Student, Role::Parent]);

        assert!(!staff.intersects(family));
        assert!(staff.intersects(RoleSet::from(Role::Teacher)));
        assert!(!staff.intersects(RoleSet::empty()));

        assert!(RoleSet::all().is_superset(staff));
        assert!(!staff.is_superset(RoleSet::all()));
        assert!(staff.is_superset(RoleSet::empty()));
    }

    #[test]
    fn test_role_set_highest() {
        assert_eq!(
            RoleSet::from([Role::Student, Role::Admin, Role::Parent]).highest(),
            Some(Role::Admin)
        );
        assert_eq!(
            RoleSet::from([Role::Parent, Role::Student]).highest(),
            Some(Role::Student)
        );
        assert_eq!(RoleSet::empty().highest(), None);
    }

    #[test]
    fn test_role_set_iterates_highest_first() {
        let roles: Vec<Role> = RoleSet::all().iter().collect();
        assert_eq!(roles, Role::ALL.to_vec());
    }

    #[test]
    fn test_role_set_display_uses_canonical_names() {
        let set = RoleSet::from([Role::Parent, Role::Teacher]);
        assert_eq!(set.to_string(), "[TEACHER, PARENT]");
        assert_eq!(RoleSet::from(Role::Admin).to_string(), "[ADMIN]");
        assert_eq!(RoleSet::empty().to_string(), "[]");
    }

    #[test]
    fn test_role_set_serde() {
        let set = RoleSet::from([Role::Parent, Role::Teacher]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["TEACHER","PARENT"]"#);

        let decoded: RoleSet = serde_json::from_str(r#"["PARENT","TEACHER","PARENT"]"#).unwrap();
        assert_eq!(decoded, set);
    }
}
