//! Kani bounded model checking proofs for RBAC correctness.
//!
//! These proofs verify critical decision properties:
//! - Proof #1: Fail closed - an absent or role-less principal is granted nothing
//! - Proof #2: Admin override - admin satisfies every capability and ownership check
//! - Proof #3: Teacher ownership - matching ids without the Teacher role grant nothing
//! - Proof #4: Priority order - the highest role dominates every held role
//! - Proof #5: Overrides - no capability override can lock admin out
//!
//! Run with: `cargo kani --harness verify_*`

use crate::{
    capabilities::{Capability, CapabilityTable},
    engine::{
        can_access_resource, can_parent_access_student, can_teacher_access_course, highest_role,
    },
    principal::Principal,
    roles::{Role, RoleSet},
};

fn role_from_index(index: u8) -> Role {
    Role::ALL[usize::from(index % 4)]
}

fn roles_from_bits(bits: u8) -> RoleSet {
    Role::ALL
        .into_iter()
        .enumerate()
        .filter(|(i, _)| bits & (1 << i) != 0)
        .map(|(_, role)| role)
        .collect()
}

//=============================================================================
// Proof #1: Fail Closed
//=============================================================================

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_fail_closed() {
    let absent: Option<&Principal> = None;
    let roleless = Principal::new("u", RoleSet::empty());

    for capability in Capability::ALL {
        assert!(!CapabilityTable::STANDARD.permits(absent, capability));
        assert!(!CapabilityTable::STANDARD.permits(&roleless, capability));
    }

    assert!(highest_role(absent).is_none());
    assert!(highest_role(&roleless).is_none());
    assert!(!can_access_resource(absent, "u", &[]));
    assert!(!can_teacher_access_course(absent, "u"));
    assert!(!can_parent_access_student(absent, "u"));
}

//=============================================================================
// Proof #2: Admin Override
//=============================================================================

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_admin_override() {
    let bits: u8 = kani::any();
    let admin = Principal::new("root", roles_from_bits(bits).with(Role::Admin));

    for capability in Capability::ALL {
        assert!(CapabilityTable::STANDARD.permits(&admin, capability));
    }

    assert!(can_access_resource(&admin, "someone-else", &[]));
    assert!(can_teacher_access_course(&admin, "someone-else"));
    assert!(can_parent_access_student(&admin, "someone-else"));
}

//=============================================================================
// Proof #3: Teacher Ownership
//=============================================================================

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_teacher_ownership_requires_role() {
    let bits: u8 = kani::any();
    let mut roles = roles_from_bits(bits);
    roles.remove(Role::Admin);
    roles.remove(Role::Teacher);

    let principal = Principal::new("t1", roles);
    assert!(!can_teacher_access_course(&principal, "t1"));
}

//=============================================================================
// Proof #4: Priority Order
//=============================================================================

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_highest_role_dominates() {
    let bits: u8 = kani::any();
    let extra: u8 = kani::any();
    let roles = roles_from_bits(bits).with(role_from_index(extra));
    let principal = Principal::new("u", roles);

    let top = highest_role(&principal).unwrap();
    assert!(roles.contains(top));
    for role in roles.iter() {
        assert!(top.priority() >= role.priority());
    }
}

//=============================================================================
// Proof #5: Overrides Keep Admin
//=============================================================================

#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_override_keeps_admin() {
    let bits: u8 = kani::any();
    let index: u8 = kani::any();
    let capability = Capability::ALL[usize::from(index % 7)];

    let table = CapabilityTable::STANDARD.with_allowed(capability, roles_from_bits(bits));
    let admin = Principal::new("root", Role::Admin);

    assert!(table.permits(&admin, capability));
}
