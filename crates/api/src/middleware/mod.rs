//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the authenticated user from an access token.

pub mod auth;
