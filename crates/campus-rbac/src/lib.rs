//! # campus-rbac: Role-Based Access Control
//!
//! Access decisions for the academic platform:
//! - **Role checks** (4 roles: Admin, Teacher, Student, Parent)
//! - **Capability predicates** backed by a single policy table
//! - **Ownership checks** (own resources, taught courses, linked students)
//! - **Route guards** and navigation filtering
//! - **Enforcement** with audit logging for request handlers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Session collaborator                        │
//! │  (verified claims: uid, roles, parentOf)     │
//! └─────────────────┬───────────────────────────┘
//!                   │ Principal::from_claims
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Decision engine (pure, stateless)           │
//! │  ├─ Role membership / highest role           │
//! │  ├─ Capability table                         │
//! │  └─ Ownership overrides                      │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!         ┌─────────┴──────────┐
//!         ▼                    ▼
//! ┌───────────────┐   ┌─────────────────┐
//! │ Router        │   │ AccessEnforcer   │
//! │ allow/redirect│   │ Ok / 401 / 403   │
//! └───────────────┘   └─────────────────┘
//! ```
//!
//! ## Roles
//!
//! | Role    | Admin area | Manage courses | Grade | Audit logs | Course content |
//! |---------|------------|----------------|-------|------------|----------------|
//! | Parent  | ✗          | ✗              | ✗     | ✗          | ✓              |
//! | Student | ✗          | ✗              | ✗     | ✗          | ✓              |
//! | Teacher | ✗          | ✓              | ✓     | ✓          | ✓              |
//! | Admin   | ✓          | ✓              | ✓     | ✓          | ✓              |
//!
//! Priority for [`highest_role`]: Admin (4) > Teacher (3) > Student (2) > Parent (1).
//!
//! ## Examples
//!
//! ### Predicates
//!
//! ```
//! use campus_rbac::{Principal, Role, can_manage_courses, can_teacher_access_course, highest_role};
//!
//! let teacher = Principal::new("u1", Role::Teacher);
//!
//! assert!(can_manage_courses(&teacher));
//! assert!(can_teacher_access_course(&teacher, "u1"));
//! assert!(!can_teacher_access_course(&teacher, "u9"));
//! assert_eq!(highest_role(&teacher), Some(Role::Teacher));
//!
//! // No session, no access
//! assert!(!can_manage_courses(None::<&Principal>));
//! ```
//!
//! ### Enforcement
//!
//! ```
//! use campus_rbac::{AccessEnforcer, Capability, Principal, Role};
//!
//! let enforcer = AccessEnforcer::standard();
//! let parent = Principal::new("p1", Role::Parent).with_owned_student("s9");
//!
//! enforcer.enforce_student_access(&parent, "s9")?;
//! assert!(enforcer.enforce_capability(&parent, Capability::GradeSubmissions).is_err());
//! # Ok::<(), campus_rbac::EnforcementError>(())
//! ```
//!
//! ## Design
//!
//! - Fail closed: absent principals, empty role sets and malformed claims
//!   resolve to "no access", never to an error or a default role.
//! - Roles are authoritative server-issued state. No client-side override is
//!   consulted.
//! - Everything is immutable; all types are `Send + Sync`.

pub mod capabilities;
pub mod claims;
pub mod enforcement;
pub mod engine;
pub mod navigation;
pub mod principal;
pub mod roles;

// Re-export commonly used types
pub use capabilities::{Capability, CapabilityTable, ParseCapabilityError, STANDARD_CAPABILITIES};
pub use enforcement::{AccessEnforcer, EnforcementError};
pub use engine::{
    ResourceDescriptor, can_access_admin, can_access_resource, can_create_assignments,
    can_grade_submissions, can_manage_courses, can_manage_enrollments, can_parent_access_student,
    can_teacher_access_course, can_view_audit_logs, can_view_course_content, has_all_roles,
    has_any_role, has_role, highest_role, is_admin, is_parent, is_student, is_teacher,
};
pub use navigation::{Route, RouteAccess, RouteDecision, Router};
pub use principal::{Principal, PrincipalId};
pub use roles::{ParseRoleError, Role, RoleSet};


// Kani proofs for bounded model checking
#[cfg(kani)]
mod kani_proofs;
