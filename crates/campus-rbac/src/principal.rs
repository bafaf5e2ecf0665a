//! The acting identity for a single access decision.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roles::{Role, RoleSet};

/// Opaque identifier of a user (principal, course owner, student, ...).
///
/// Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PrincipalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PrincipalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PrincipalId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PrincipalId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Snapshot of an authenticated identity.
///
/// Built once per request by the session collaborator (directly, or through
/// [`Principal::from_claims`]) and never mutated by the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,

    roles: RoleSet,

    /// Students this principal is linked to as a guardian.
    ///
    /// Only consulted for parent/student checks.
    #[serde(default)]
    owned_student_ids: BTreeSet<PrincipalId>,
}

impl Principal {
    /// Creates a principal with the given roles and no student links.
    pub fn new(id: impl Into<PrincipalId>, roles: impl Into<RoleSet>) -> Self {
        Self {
            id: id.into(),
            roles: roles.into(),
            owned_student_ids: BTreeSet::new(),
        }
    }

    /// Creates a principal holding a single role.
    pub fn with_single_role(id: impl Into<PrincipalId>, role: Role) -> Self {
        Self::new(id, RoleSet::from(role))
    }

    /// Adds a role (builder).
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Links a student to this principal (builder).
    pub fn with_owned_student(mut self, student_id: impl Into<PrincipalId>) -> Self {
        self.owned_student_ids.insert(student_id.into());
        self
    }

    /// Links several students to this principal (builder).
    pub fn with_owned_students<I, S>(mut self, student_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PrincipalId>,
    {
        self.owned_student_ids
            .extend(student_ids.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    pub fn roles(&self) -> RoleSet {
        self.roles
    }

    pub fn owned_student_ids(&self) -> &BTreeSet<PrincipalId> {
        &self.owned_student_ids
    }

    /// Returns whether `student_id` is one of this principal's linked students.
    pub fn is_linked_to(&self, student_id: &str) -> bool {
        self.owned_student_ids.contains(student_id)
    }
}
