//! Route guards and navigation filtering.
//!
//! Routing collaborators ask two questions: may this principal open a page,
//! and which pages belong in their menu. Both are answered from one route
//! table.

use serde::{Deserialize, Serialize};

use crate::engine::has_any_of;
use crate::principal::Principal;
use crate::roles::{Role, RoleSet};

/// Default login page.
pub const DEFAULT_LOGIN_PATH: &str = "/auth";

/// Default landing page for authenticated principals.
pub const DEFAULT_FALLBACK_PATH: &str = "/dashboard";

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone, logged in or not.
    Public,

    /// Any present principal.
    Authenticated,

    /// A present principal holding at least one of the roles, or admin.
    AnyOf(RoleSet),
}

impl RouteAccess {
    /// Returns whether a present principal satisfies this rule.
    pub fn admits(self, principal: &Principal) -> bool {
        match self {
            RouteAccess::Public | RouteAccess::Authenticated => true,
            RouteAccess::AnyOf(roles) => has_any_of(principal, roles.with(Role::Admin)),
        }
    }
}

/// A page known to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub label: String,
    pub access: RouteAccess,
    /// Whether the route appears in the navigation menu.
    pub in_navigation: bool,
}

impl Route {
    /// Creates a route shown in navigation.
    pub fn new(path: impl Into<String>, label: impl Into<String>, access: RouteAccess) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            access,
            in_navigation: true,
        }
    }

    /// Hides the route from navigation (builder).
    pub fn hidden(mut self) -> Self {
        self.in_navigation = false;
        self
    }

    /// Returns whether the route belongs in this principal's menu.
    ///
    /// Menu entries are role-gated even for routes any logged-in principal
    /// may open, so a principal with no roles sees an empty menu.
    pub fn visible_to(&self, principal: &Principal) -> bool {
        if !self.in_navigation {
            return false;
        }
        match self.access {
            RouteAccess::Public => false,
            RouteAccess::Authenticated => has_any_of(principal, RoleSet::all()),
            RouteAccess::AnyOf(_) => self.access.admits(principal),
        }
    }
}

/// Standard page table of the platform.
pub fn standard_routes() -> Vec<Route> {
    vec![
        Route::new(DEFAULT_LOGIN_PATH, "Sign in", RouteAccess::Public).hidden(),
        Route::new("/dashboard", "Dashboard", RouteAccess::Authenticated),
        Route::new("/courses", "Courses", RouteAccess::Authenticated),
        Route::new("/assignments", "Assignments", RouteAccess::Authenticated),
        Route::new(
            "/admin/users",
            "Users",
            RouteAccess::AnyOf(RoleSet::from_roles(&[Role::Admin])),
        ),
        Route::new(
            "/admin/analytics",
            "Analytics",
            RouteAccess::AnyOf(RoleSet::from_roles(&[Role::Admin, Role::Teacher])),
        ),
        Route::new("/settings", "Settings", RouteAccess::Authenticated),
    ]
}

/// Outcome of a route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Render the requested page.
    Allow,
    /// Send the visitor to the login page.
    RedirectToLogin,
    /// Send the principal to their landing page.
    RedirectToFallback,
}

/// Route guard over a page table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    login_path: String,
    fallback_path: String,
}

impl Router {
    pub fn new(
        routes: Vec<Route>,
        login_path: impl Into<String>,
        fallback_path: impl Into<String>,
    ) -> Self {
        Self {
            routes,
            login_path: login_path.into(),
            fallback_path: fallback_path.into(),
        }
    }

    /// Router over [`standard_routes`] with the default login and fallback pages.
    pub fn standard() -> Self {
        Self::new(standard_routes(), DEFAULT_LOGIN_PATH, DEFAULT_FALLBACK_PATH)
    }

    /// Decides whether `principal` may open `path`.
    ///
    /// - Absent principal on anything but a public route: login
    /// - Present principal on the login page: fallback
    /// - Role-gated route without a matching role or admin: fallback
    /// - Unknown path: fallback (login when absent)
    pub fn decide<'a>(
        &self,
        principal: impl Into<Option<&'a Principal>>,
        path: &str,
    ) -> RouteDecision {
        let principal = principal.into();

        let Some(route) = self.route(path) else {
            return match principal {
                Some(_) => RouteDecision::RedirectToFallback,
                None => RouteDecision::RedirectToLogin,
            };
        };

        match (route.access, principal) {
            (RouteAccess::Public, Some(_)) if route.path == self.login_path => {
                RouteDecision::RedirectToFallback
            }
            (RouteAccess::Public, _) => RouteDecision::Allow,
            (_, None) => RouteDecision::RedirectToLogin,
            (access, Some(principal)) => {
                if access.admits(principal) {
                    RouteDecision::Allow
                } else {
                    RouteDecision::RedirectToFallback
                }
            }
        }
    }

    /// Returns the page a decision redirects to, if any.
    pub fn redirect_target(&self, decision: RouteDecision) -> Option<&str> {
        match decision {
            RouteDecision::Allow => None,
            RouteDecision::RedirectToLogin => Some(self.login_path.as_str()),
            RouteDecision::RedirectToFallback => Some(self.fallback_path.as_str()),
        }
    }

    /// Returns the menu entries for `principal`, in table order.
    pub fn visible_navigation<'a>(
        &self,
        principal: impl Into<Option<&'a Principal>>,
    ) -> Vec<&Route> {
        let Some(principal) = principal.into() else {
            return Vec::new();
        };
        self.routes
            .iter()
            .filter(|route| route.visible_to(principal))
            .collect()
    }

    pub fn route(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn fallback_path(&self) -> &str {
        &self.fallback_path
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::standard()
    }
}
