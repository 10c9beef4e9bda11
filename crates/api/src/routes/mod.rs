pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /public/loginWithFacebook                  login (POST)
/// /public/masks/{id}                         a user's masks (GET)
///
/// /auth/charCustomization                    get, save (requires auth)
/// /auth/charCustomization/random             random predefined (requires auth)
/// /auth/gameToken                            short-lived game token (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // No token required.
        .nest("/public", public::router())
        // Access token required (enforced by the `AuthUser` extractor).
        .nest("/auth", auth::router())
}
