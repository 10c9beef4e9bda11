//! Catalli API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth,
//! identity provider, routes) so integration tests and the binary entrypoint
//! can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
