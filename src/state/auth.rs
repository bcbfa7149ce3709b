#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, PoisonError, RwLock};

/// The current user's authentication record.
///
/// Authenticated exactly when `token` is present and non-empty. No token
/// format checks and no expiry are modeled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Shared handle to the process [`Session`].
///
/// Cloning is cheap and every clone observes the same session. Locks are
/// only taken for the duration of a field read or write, never across an
/// `.await`.
#[derive(Clone, Debug, Default)]
pub struct AuthStore {
    inner: Arc<RwLock<Session>>,
}

impl AuthStore {
    /// Empty, unauthenticated store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read(|s| s.token.clone())
    }

    /// The token to send as a bearer credential. An empty token is treated
    /// as no token.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.token().filter(|t| !t.is_empty())
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.read(|s| s.username.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read(Session::is_authenticated)
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read(Session::clone)
    }

    /// Overwrite both fields.
    pub fn set_auth(&self, token: impl Into<String>, username: impl Into<String>) {
        let username = username.into();
        tracing::debug!(%username, "session set");
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        session.token = Some(token.into());
        session.username = Some(username);
    }

    /// Reset to the empty session.
    pub fn clear_auth(&self) {
        tracing::debug!("session cleared");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
    }

    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }
}
