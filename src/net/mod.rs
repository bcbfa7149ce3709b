//! Network layer: the JSON API client and the wire types it exchanges.

pub mod api;
pub mod types;
