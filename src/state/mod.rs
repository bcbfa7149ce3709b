//! Client-side state.
//!
//! DESIGN
//! ======
//! Only the authentication session is held here. It is shared by handle,
//! not through a global, so every consumer is handed the same store.

pub mod auth;
