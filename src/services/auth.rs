//! Login and logout.
//!
//! The server issues a stateless bearer token, so logout is purely local.

use crate::error::ApiError;
use crate::net::api::{ApiClient, RequestOptions};
use crate::net::types::{LoginRequest, LoginResponse};
use crate::state::auth::AuthStore;

const LOGIN_PATH: &str = "/auth/login";

/// Exchange credentials for a token and store it in the client's session.
///
/// The session is only touched on success.
///
/// # Errors
///
/// Returns [`ApiError::Request`] when the server rejects the credentials
/// (`400` for blank fields, `401` for a mismatch), or [`ApiError::EmptyBody`]
/// if it answers `2xx` without a body.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let body = LoginRequest { username: username.to_string(), password: password.to_string() };
    let options = RequestOptions::post().json(&body)?;
    let response: LoginResponse = client.request_json(LOGIN_PATH, options).await?.ok_or(ApiError::EmptyBody)?;

    client.auth().set_auth(response.token.clone(), response.username.clone());
    tracing::info!(username = %response.username, "logged in");
    Ok(response)
}

/// Drop the current session.
pub fn logout(auth: &AuthStore) {
    if let Some(username) = auth.username() {
        tracing::info!(%username, "logged out");
    }
    auth.clear_auth();
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
