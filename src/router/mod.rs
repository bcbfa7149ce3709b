//! Static route table and guarded navigation.
//!
//! DESIGN
//! ======
//! Routes are fixed at compile time. `Router::navigate` resolves a path,
//! then asks the [`RouteGuard`] whether to enter it. Unauthenticated access
//! to a protected route is a `Redirect` value, not an error.

pub mod guard;

pub use guard::{Decision, RouteGuard};

use crate::state::auth::AuthStore;

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

/// The todo list view.
pub const TODOS: Route = Route { path: "/", name: "todos", requires_auth: true };
/// The login view. Always reachable.
pub const LOGIN: Route = Route { path: "/login", name: "login", requires_auth: false };

pub static ROUTES: [Route; 2] = [TODOS, LOGIN];

/// Result of a navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Proceed(&'static Route),
    /// The target required auth; go here instead.
    Redirect(&'static Route),
    NotFound(String),
}

#[derive(Clone, Debug)]
pub struct Router {
    routes: &'static [Route],
    guard: RouteGuard,
}

impl Router {
    /// Router over [`ROUTES`], guarded by `auth`.
    #[must_use]
    pub fn new(auth: AuthStore) -> Self {
        Self { routes: &ROUTES, guard: RouteGuard::new(auth) }
    }

    #[must_use]
    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }

    /// Match `path` ignoring any query string, fragment, or trailing slash.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&'static Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&'static Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolve `path` and run the guard on the match.
    #[must_use]
    pub fn navigate(&self, path: &str) -> Navigation {
        match self.resolve(path) {
            Some(route) => self.enter(route),
            None => Navigation::NotFound(path.to_string()),
        }
    }

    /// Same as [`Router::navigate`], addressing the route by name.
    #[must_use]
    pub fn navigate_by_name(&self, name: &str) -> Navigation {
        match self.by_name(name) {
            Some(route) => self.enter(route),
            None => Navigation::NotFound(name.to_string()),
        }
    }

    fn enter(&self, route: &'static Route) -> Navigation {
        match self.guard.before_each(route) {
            Decision::Proceed => Navigation::Proceed(route),
            Decision::RedirectToLogin => Navigation::Redirect(&LOGIN),
        }
    }
}

fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
