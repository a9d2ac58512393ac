//! Prepdesk REST API server library
//!
//! Exposes route construction for integration testing.

pub mod routes;

pub use routes::create_routes;
