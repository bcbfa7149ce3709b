//! Navigation guard enforcing per-route authentication.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::Route;
use crate::state::auth::AuthStore;

/// Outcome of one guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    RedirectToLogin,
}

/// Proceed unless the route requires auth and the session has none.
#[must_use]
pub fn decide(requires_auth: bool, authenticated: bool) -> Decision {
    if requires_auth && !authenticated { Decision::RedirectToLogin } else { Decision::Proceed }
}

/// Runs [`decide`] against the live session before each navigation.
#[derive(Clone, Debug)]
pub struct RouteGuard {
    auth: AuthStore,
}

impl RouteGuard {
    #[must_use]
    pub fn new(auth: AuthStore) -> Self {
        Self { auth }
    }

    #[must_use]
    pub fn before_each(&self, to: &Route) -> Decision {
        let decision = decide(to.requires_auth, self.auth.is_authenticated());
        if decision == Decision::RedirectToLogin {
            tracing::debug!(route = to.name, "unauthenticated navigation redirected to login");
        }
        decision
    }
}
