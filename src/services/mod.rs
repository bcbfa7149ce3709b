//! Typed calls for the server's REST endpoints.
//!
//! ARCHITECTURE
//! ============
//! Each function is one `ApiClient::request_json` call with a fixed method
//! and path. No todo logic lives client-side; the server owns validation
//! and ownership checks.

pub mod auth;
pub mod todos;
