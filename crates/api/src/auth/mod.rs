//! Token primitives.
//!
//! - [`jwt`] -- access and game token generation and validation.

pub mod jwt;
