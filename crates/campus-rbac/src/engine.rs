//! Access decision predicates.
//!
//! Every function here is pure and total. The principal argument accepts
//! either `&Principal` or `Option<&Principal>`; an absent principal is never
//! granted anything. Denial is an ordinary `false`, never an error.

use crate::capabilities::{Capability, CapabilityTable};
use crate::principal::{Principal, PrincipalId};
use crate::roles::{Role, RoleSet};

// ============================================================================
// Role membership
// ============================================================================

/// Returns whether the principal holds `role`.
pub fn has_role<'a>(principal: impl Into<Option<&'a Principal>>, role: Role) -> bool {
    principal.into().is_some_and(|p| p.roles().contains(role))
}

/// Returns whether the principal holds at least one of `roles`.
///
/// An empty `roles` list is never satisfied.
pub fn has_any_role<'a>(principal: impl Into<Option<&'a Principal>>, roles: &[Role]) -> bool {
    has_any_of(principal, RoleSet::from(roles))
}

pub(crate) fn has_any_of<'a>(principal: impl Into<Option<&'a Principal>>, roles: RoleSet) -> bool {
    principal
        .into()
        .is_some_and(|p| p.roles().intersects(roles))
}

/// Returns whether the principal holds every one of `roles`.
///
/// An empty `roles` list is vacuously satisfied by any present principal,
/// including one with no roles at all.
pub fn has_all_roles<'a>(principal: impl Into<Option<&'a Principal>>, roles: &[Role]) -> bool {
    principal
        .into()
        .is_some_and(|p| p.roles().is_superset(RoleSet::from(roles)))
}

pub fn is_admin<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    has_role(principal, Role::Admin)
}

pub fn is_teacher<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    has_role(principal, Role::Teacher)
}

pub fn is_student<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    has_role(principal, Role::Student)
}

pub fn is_parent<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    has_role(principal, Role::Parent)
}

/// Returns the principal's role with the highest priority.
///
/// `None` for an absent principal or an empty role set; there is no default role.
pub fn highest_role<'a>(principal: impl Into<Option<&'a Principal>>) -> Option<Role> {
    principal.into().and_then(|p| p.roles().highest())
}

// ============================================================================
// Capabilities (standard table)
// ============================================================================

fn standard<'a>(principal: impl Into<Option<&'a Principal>>, capability: Capability) -> bool {
    CapabilityTable::STANDARD.permits(principal, capability)
}

pub fn can_access_admin<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    standard(principal, Capability::AccessAdmin)
}

pub fn can_manage_courses<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    standard(principal, Capability::ManageCourses)
}

pub fn can_create_assignments<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    standard(principal, Capability::CreateAssignments)
}

pub fn can_grade_submissions<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    standard(principal, Capability::GradeSubmissions)
}

pub fn can_manage_enrollments<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    standard(principal, Capability::ManageEnrollments)
}

pub fn can_view_audit_logs<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    standard(principal, Capability::ViewAuditLogs)
}

pub fn can_view_course_content<'a>(principal: impl Into<Option<&'a Principal>>) -> bool {
    standard(principal, Capability::ViewCourseContent)
}

// ============================================================================
// Ownership
// ============================================================================

/// Returns whether the principal may act on a resource owned by `resource_owner_id`.
///
/// Evaluation order:
/// 1. Absent principal is denied
/// 2. If `required_roles` is non-empty, the principal must hold one of them
/// 3. Admin is allowed
/// 4. The owner is allowed
/// 5. Everyone else is denied
pub fn can_access_resource<'a>(
    principal: impl Into<Option<&'a Principal>>,
    resource_owner_id: &str,
    required_roles: &[Role],
) -> bool {
    let Some(principal) = principal.into() else {
        return false;
    };

    if !required_roles.is_empty() && !has_any_role(principal, required_roles) {
        return false;
    }

    if is_admin(principal) {
        return true;
    }

    principal.id() == resource_owner_id
}

/// Returns whether the principal may act on a course taught by `course_teacher_id`.
///
/// Matching ids alone are not enough: a non-admin must also hold the Teacher role.
pub fn can_teacher_access_course<'a>(
    principal: impl Into<Option<&'a Principal>>,
    course_teacher_id: &str,
) -> bool {
    let Some(principal) = principal.into() else {
        return false;
    };

    if is_admin(principal) {
        return true;
    }

    is_teacher(principal) && principal.id() == course_teacher_id
}

/// Returns whether the principal may view the records of `student_id`.
///
/// A non-admin must hold the Parent role and be linked to the student.
pub fn can_parent_access_student<'a>(
    principal: impl Into<Option<&'a Principal>>,
    student_id: &str,
) -> bool {
    let Some(principal) = principal.into() else {
        return false;
    };

    if is_admin(principal) {
        return true;
    }

    is_parent(principal) && principal.is_linked_to(student_id)
}

// ============================================================================
// Resource descriptor
// ============================================================================

/// Ephemeral description of a resource being acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Recorded owner of the resource (course teacher, record creator, ...).
    pub owner_id: PrincipalId,

    /// Roles of which the principal must hold at least one; empty means no
    /// role requirement.
    pub required_roles: Vec<Role>,
}

impl ResourceDescriptor {
    pub fn owned_by(owner_id: impl Into<PrincipalId>) -> Self {
        Self {
            owner_id: owner_id.into(),
            required_roles: Vec::new(),
        }
    }

    /// Adds a required role (builder).
    pub fn requiring(mut self, role: Role) -> Self {
        if !self.required_roles.contains(&role) {
            self.required_roles.push(role);
        }
        self
    }

    /// Evaluates [`can_access_resource`] for this descriptor.
    pub fn permits<'a>(&self, principal: impl Into<Option<&'a Principal>>) -> bool {
        can_access_resource(principal, self.owner_id.as_str(), &self.required_roles)
    }
}
