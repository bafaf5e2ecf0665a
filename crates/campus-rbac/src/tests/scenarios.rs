//! End-to-end decisions for representative platform users.

use serde_json::json;

use crate::capabilities::Capability;
use crate::engine::{
    can_access_admin, can_access_resource, can_grade_submissions, can_manage_courses,
    can_parent_access_student, can_teacher_access_course, can_view_course_content, highest_role,
};
use crate::enforcement::{AccessEnforcer, EnforcementError};
use crate::navigation::{RouteDecision, Router};
use crate::principal::Principal;
use crate::roles::Role;

#[test]
fn teacher_session() {
    let principal = Principal::from_claims(&json!({ "uid": "u1", "roles": ["TEACHER"] })).unwrap();

    assert!(can_manage_courses(&principal));
    assert!(!can_access_admin(&principal));
    assert!(can_grade_submissions(&principal));
    assert_eq!(highest_role(&principal), Some(Role::Teacher));

    assert!(can_teacher_access_course(&principal, "u1"));
    assert!(!can_teacher_access_course(&principal, "u7"));
}

#[test]
fn student_and_parent_session() {
    let principal = Principal::from_claims(&json!({
        "uid": "u2",
        "roles": ["STUDENT", "PARENT"],
        "parentOf": ["s9"],
    }))
    .unwrap();

    assert!(can_view_course_content(&principal));
    assert!(can_parent_access_student(&principal, "s9"));
    assert!(!can_parent_access_student(&principal, "s8"));

    // Own submission, but not someone else's
    assert!(can_access_resource(&principal, "u2", &[Role::Student]));
    assert!(!can_access_resource(&principal, "s9", &[Role::Student]));
}

#[test]
fn grading_request_through_enforcer() {
    let enforcer = AccessEnforcer::standard().without_audit();
    let teacher = Principal::new("t1", Role::Teacher);
    let student = Principal::new("s1", Role::Student);

    // Teacher grading a submission in their own course
    let grade = enforcer
        .enforce_capability(&teacher, Capability::GradeSubmissions)
        .and_then(|()| enforcer.enforce_course_access(&teacher, "t1"));
    assert!(grade.is_ok());

    // Same teacher, someone else's course
    let grade = enforcer
        .enforce_capability(&teacher, Capability::GradeSubmissions)
        .and_then(|()| enforcer.enforce_course_access(&teacher, "t2"));
    assert!(matches!(grade, Err(EnforcementError::AccessDenied { .. })));

    // Student trying to grade
    let grade = enforcer.enforce_capability(&student, Capability::GradeSubmissions);
    assert_eq!(grade.unwrap_err().status_code(), 403);
}

#[test]
fn logged_out_visitor() {
    let session: Option<Principal> = None;
    let router = Router::standard();

    assert_eq!(
        router.decide(session.as_ref(), "/courses"),
        RouteDecision::RedirectToLogin
    );
    assert!(router.visible_navigation(session.as_ref()).is_empty());
    assert!(!can_view_course_content(session.as_ref()));
    assert_eq!(highest_role(session.as_ref()), None);
}
