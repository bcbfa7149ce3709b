//! # todo-client
//!
//! Client-side plumbing for the todo-list application: the session store,
//! the navigation guard with its static route table, and the JSON API client
//! with typed wrappers for the server's auth and todo endpoints.
//!
//! DESIGN
//! ======
//! The session lives in an explicit [`state::auth::AuthStore`] handle. The
//! [`net::api::ApiClient`] and [`router::RouteGuard`] each take a clone of it
//! at construction, so login/logout is observed by both immediately.

pub mod config;
pub mod error;
pub mod net;
pub mod router;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
