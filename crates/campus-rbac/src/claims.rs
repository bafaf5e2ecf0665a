//! Normalisation of identity claims into a [`Principal`].
//!
//! Session collaborators hand over loosely-typed user records: a profile with
//! a `roles` array, a token with a single `role` string, or both. This is the
//! only place where that shape is interpreted. Anything malformed is dropped,
//! never guessed at.

use serde_json::{Map, Value};
use tracing::debug;

use crate::principal::{Principal, PrincipalId};
use crate::roles::{Role, RoleSet};

const ID_KEYS: [&str; 2] = ["uid", "id"];
const STUDENT_LINK_KEYS: [&str; 2] = ["parentOf", "owned_student_ids"];

impl Principal {
    /// Builds a principal from a JSON claims object.
    ///
    /// Returns `None` (no principal) when the value is not an object or has
    /// no usable identifier. Roles are taken from a `roles` array and a
    /// single `role` string; entries that are not exact role names are
    /// discarded, as is a `roles` field that is not an array. Any other
    /// field, including client-side flags such as `isAdminUser`, is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_rbac::{Principal, Role};
    /// use serde_json::json;
    ///
    /// let principal = Principal::from_claims(&json!({
    ///     "uid": "u2",
    ///     "roles": ["STUDENT", "PARENT"],
    ///     "parentOf": ["s9"],
    /// }))
    /// .unwrap();
    ///
    /// assert!(principal.roles().contains(Role::Parent));
    /// assert!(principal.is_linked_to("s9"));
    /// ```
    pub fn from_claims(claims: &Value) -> Option<Principal> {
        let object = claims.as_object()?;

        let Some(id) = id_field(object) else {
            debug!("Claims carry no usable identifier");
            return None;
        };

        let mut roles = RoleSet::empty();
        match object.get("roles") {
            None | Some(Value::Null) => {}
            Some(Value::Array(entries)) => roles.extend(entries.iter().filter_map(role_from)),
            Some(other) => {
                debug!(principal = %id, roles = %other, "Ignoring non-array roles claim");
            }
        }
        if let Some(single) = object.get("role") {
            roles.extend(role_from(single));
        }

        let mut principal = Principal::new(id, roles);
        for key in STUDENT_LINK_KEYS {
            if let Some(Value::Array(links)) = object.get(key) {
                principal = principal.with_owned_students(
                    links
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|link| !link.is_empty()),
                );
            }
        }

        Some(principal)
    }
}

fn id_field(object: &Map<String, Value>) -> Option<PrincipalId> {
    ID_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(id_from))
}

fn id_from(value: &Value) -> Option<PrincipalId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(PrincipalId::from(s.as_str())),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(PrincipalId::from(n.to_string())),
        _ => None,
    }
}

fn role_from(value: &Value) -> Option<Role> {
    let Some(name) = value.as_str() else {
        debug!(entry = %value, "Ignoring non-string role entry");
        return None;
    };
    match name.parse::<Role>() {
        Ok(role) => Some(role),
        Err(err) => {
            debug!(error = %err, "Ignoring unrecognised role");
            None
        }
    }
}
