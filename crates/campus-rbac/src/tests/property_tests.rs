//! Property-based tests using proptest.
//!
//! Tests invariants of the decision engine that should hold for every
//! principal and every role combination.

use proptest::prelude::*;

use crate::capabilities::{Capability, CapabilityTable};
use crate::engine::{
    can_access_resource, can_parent_access_student, can_teacher_access_course, has_all_roles,
    has_any_role, has_role, highest_role, is_admin,
};
use crate::principal::Principal;
use crate::roles::{Role, RoleSet};

fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn arb_roles() -> impl Strategy<Value = Vec<Role>> {
    prop::collection::vec(arb_role(), 0..6)
}

fn arb_capability() -> impl Strategy<Value = Capability> {
    prop::sample::select(Capability::ALL.to_vec())
}

fn arb_id() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,6}"
}

prop_compose! {
    fn arb_principal()(
        id in arb_id(),
        roles in arb_roles(),
        students in prop::collection::vec(arb_id(), 0..4),
    ) -> Principal {
        Principal::new(id, RoleSet::from(roles)).with_owned_students(students)
    }
}

proptest! {
    // ========================================================================
    // Role membership
    // ========================================================================

    #[test]
    fn singleton_holds_its_role(role in arb_role()) {
        prop_assert!(has_role(&Principal::new("p", role), role));
        prop_assert!(!has_role(&Principal::new("p", RoleSet::empty()), role));
    }

    #[test]
    fn empty_role_lists(p in arb_principal()) {
        prop_assert!(!has_any_role(&p, &[]));
        prop_assert!(has_all_roles(&p, &[]));
    }

    #[test]
    fn any_and_all_match_membership(p in arb_principal(), wanted in arb_roles()) {
        let any = wanted.iter().any(|role| has_role(&p, *role));
        let all = wanted.iter().all(|role| has_role(&p, *role));
        prop_assert_eq!(has_any_role(&p, &wanted), any);
        prop_assert_eq!(has_all_roles(&p, &wanted), all);
    }

    #[test]
    fn role_set_ignores_order_and_duplicates(
        (roles, shuffled) in arb_roles().prop_flat_map(|roles| {
            let doubled = [roles.clone(), roles.clone()].concat();
            (Just(roles), Just(doubled).prop_shuffle())
        })
    ) {
        prop_assert_eq!(RoleSet::from(roles), RoleSet::from(shuffled));
    }

    // ========================================================================
    // Highest role
    // ========================================================================

    #[test]
    fn highest_role_is_held_and_dominates(p in arb_principal()) {
        match highest_role(&p) {
            None => prop_assert!(p.roles().is_empty()),
            Some(top) => {
                prop_assert!(has_role(&p, top));
                for role in p.roles().iter() {
                    prop_assert!(top.priority() >= role.priority());
                }
            }
        }
    }

    // ========================================================================
    // Capabilities
    // ========================================================================

    #[test]
    fn capability_is_any_role_of_table(p in arb_principal(), capability in arb_capability()) {
        let standard = CapabilityTable::STANDARD;
        let allowed: Vec<Role> = standard.allowed_roles(capability).iter().collect();
        prop_assert_eq!(
            standard.permits(&p, capability),
            has_any_role(&p, &allowed)
        );
    }

    #[test]
    fn admin_holds_every_capability(p in arb_principal(), capability in arb_capability()) {
        let admin = p.with_role(Role::Admin);
        prop_assert!(CapabilityTable::STANDARD.permits(&admin, capability));
    }

    #[test]
    fn overrides_never_lock_out_admin(
        p in arb_principal(),
        capability in arb_capability(),
        roles in arb_roles(),
    ) {
        let table = CapabilityTable::STANDARD.with_allowed(capability, RoleSet::from(roles));
        let admin = p.with_role(Role::Admin);
        prop_assert!(table.permits(&admin, capability));
    }

    // ========================================================================
    // Ownership
    // ========================================================================

    #[test]
    fn admin_overrides_ownership(p in arb_principal(), owner in arb_id()) {
        let admin = p.with_role(Role::Admin);
        prop_assert!(can_access_resource(&admin, &owner, &[]));
        prop_assert!(can_teacher_access_course(&admin, &owner));
        prop_assert!(can_parent_access_student(&admin, &owner));
    }

    #[test]
    fn owner_may_access_own_resource(p in arb_principal()) {
        let owner = p.id().as_str().to_string();
        prop_assert!(can_access_resource(&p, &owner, &[]));
    }

    #[test]
    fn non_owner_non_admin_is_denied(
        p in arb_principal(),
        owner in arb_id(),
        required in arb_roles(),
    ) {
        prop_assume!(!is_admin(&p));
        prop_assume!(p.id().as_str() != owner);
        prop_assert!(!can_access_resource(&p, &owner, &required));
    }

    #[test]
    fn required_roles_gate_before_ownership(p in arb_principal(), required in arb_roles()) {
        prop_assume!(!required.is_empty());
        let owner = p.id().as_str().to_string();
        prop_assert_eq!(
            can_access_resource(&p, &owner, &required),
            has_any_role(&p, &required)
        );
    }

    #[test]
    fn course_access_needs_teacher_or_admin(p in arb_principal()) {
        let course_teacher = p.id().as_str().to_string();
        let expected = is_admin(&p) || has_role(&p, Role::Teacher);
        prop_assert_eq!(can_teacher_access_course(&p, &course_teacher), expected);
    }

    #[test]
    fn parent_access_needs_link(p in arb_principal(), student in arb_id()) {
        let expected = is_admin(&p) || (has_role(&p, Role::Parent) && p.is_linked_to(&student));
        prop_assert_eq!(can_parent_access_student(&p, &student), expected);
    }

    // ========================================================================
    // Determinism
    // ========================================================================

    #[test]
    fn decisions_are_idempotent(
        p in arb_principal(),
        owner in arb_id(),
        capability in arb_capability(),
    ) {
        let snapshot = p.clone();
        let first = (
            highest_role(&p),
            CapabilityTable::STANDARD.permits(&p, capability),
            can_access_resource(&p, &owner, &[]),
            can_teacher_access_course(&p, &owner),
            can_parent_access_student(&p, &owner),
        );
        let second = (
            highest_role(&p),
            CapabilityTable::STANDARD.permits(&p, capability),
            can_access_resource(&p, &owner, &[]),
            can_teacher_access_course(&p, &owner),
            can_parent_access_student(&p, &owner),
        );
        prop_assert_eq!(first, second);
        prop_assert_eq!(p, snapshot);
    }
}
