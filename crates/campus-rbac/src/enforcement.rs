//! Policy enforcement for request handlers.
//!
//! The engine answers with booleans. Handlers that mutate data want a
//! `Result` they can `?` and map to a response status, plus an audit trail of
//! every decision. [`AccessEnforcer`] provides both.

use thiserror::Error;
use tracing::{info, warn};

use crate::capabilities::{Capability, CapabilityTable};
use crate::engine::{
    ResourceDescriptor, can_parent_access_student, can_teacher_access_course, has_any_of,
};
use crate::principal::Principal;

/// Error type for policy enforcement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnforcementError {
    /// No principal was supplied (not logged in).
    #[error("Authentication required")]
    Unauthenticated,

    /// The principal is known but not allowed.
    #[error("Access denied: {reason}")]
    AccessDenied { reason: String },
}

impl EnforcementError {
    /// HTTP status an API layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            EnforcementError::Unauthenticated => 401,
            EnforcementError::AccessDenied { .. } => 403,
        }
    }
}

/// Result type for enforcement operations.
pub type Result<T> = std::result::Result<T, EnforcementError>;

/// Policy enforcement engine.
///
/// Wraps the decision predicates for request handlers:
/// - Capability checks against a [`CapabilityTable`]
/// - Ownership checks (resources, courses, linked students)
/// - Audit logging of grants and denials
#[derive(Debug, Clone)]
pub struct AccessEnforcer {
    /// Capability policy in force.
    table: CapabilityTable,

    /// Whether to log access decisions.
    audit_enabled: bool,
}

impl AccessEnforcer {
    /// Creates an enforcer over the given capability table.
    pub fn new(table: CapabilityTable) -> Self {
        Self {
            table,
            audit_enabled: true,
        }
    }

    /// Creates an enforcer over [`CapabilityTable::STANDARD`].
    pub fn standard() -> Self {
        Self::new(CapabilityTable::STANDARD)
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Enforces a capability.
    ///
    /// **Audit:** Logs all access attempts.
    pub fn enforce_capability<'a>(
        &self,
        principal: impl Into<Option<&'a Principal>>,
        capability: Capability,
    ) -> Result<()> {
        let principal = self.authenticated(principal)?;
        let allowed_roles = self.table.allowed_roles(capability);
        let allowed = has_any_of(principal, allowed_roles);

        if self.audit_enabled {
            if allowed {
                info!(
                    principal = %principal.id(),
                    roles = %principal.roles(),
                    capability = %capability,
                    "Capability granted"
                );
            } else {
                warn!(
                    principal = %principal.id(),
                    roles = %principal.roles(),
                    capability = %capability,
                    "Capability denied"
                );
            }
        }

        if allowed {
            Ok(())
        } else {
            Err(EnforcementError::AccessDenied {
                reason: format!("'{capability}' requires one of {allowed_roles}"),
            })
        }
    }

    /// Enforces ownership (or admin) access to a resource.
    pub fn enforce_resource_access<'a>(
        &self,
        principal: impl Into<Option<&'a Principal>>,
        resource: &ResourceDescriptor,
    ) -> Result<()> {
        let principal = self.authenticated(principal)?;
        self.decide(
            principal,
            resource.permits(principal),
            "resource",
            resource.owner_id.as_str(),
        )
    }

    /// Enforces teacher (or admin) access to a course.
    pub fn enforce_course_access<'a>(
        &self,
        principal: impl Into<Option<&'a Principal>>,
        course_teacher_id: &str,
    ) -> Result<()> {
        let principal = self.authenticated(principal)?;
        self.decide(
            principal,
            can_teacher_access_course(principal, course_teacher_id),
            "course",
            course_teacher_id,
        )
    }

    /// Enforces parent (or admin) access to a student's records.
    pub fn enforce_student_access<'a>(
        &self,
        principal: impl Into<Option<&'a Principal>>,
        student_id: &str,
    ) -> Result<()> {
        let principal = self.authenticated(principal)?;
        self.decide(
            principal,
            can_parent_access_student(principal, student_id),
            "student",
            student_id,
        )
    }

    /// Returns the capability table in force.
    pub fn table(&self) -> &CapabilityTable {
        &self.table
    }

    fn authenticated<'a>(
        &self,
        principal: impl Into<Option<&'a Principal>>,
    ) -> Result<&'a Principal> {
        let principal = principal.into();
        if principal.is_none() && self.audit_enabled {
            warn!("Access attempted without a principal");
        }
        principal.ok_or(EnforcementError::Unauthenticated)
    }

    fn decide(&self, principal: &Principal, allowed: bool, kind: &str, owner: &str) -> Result<()> {
        if self.audit_enabled {
            if allowed {
                info!(
                    principal = %principal.id(),
                    roles = %principal.roles(),
                    kind,
                    owner,
                    "Ownership access granted"
                );
            } else {
                warn!(
                    principal = %principal.id(),
                    roles = %principal.roles(),
                    kind,
                    owner,
                    "Ownership access denied"
                );
            }
        }

        if allowed {
            Ok(())
        } else {
            Err(EnforcementError::AccessDenied {
                reason: format!(
                    "Principal '{}' may not access {kind} owned by '{owner}'",
                    principal.id()
                ),
            })
        }
    }
}

impl Default for AccessEnforcer {
    fn default() -> Self {
        Self::standard()
    }
}
