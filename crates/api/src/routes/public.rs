//! Route definitions for the `/public` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{login, masks};
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// POST /loginWithFacebook  -> login_with_facebook
/// GET  /masks/{id}         -> get_masks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/loginWithFacebook", post(login::login_with_facebook))
        .route("/masks/{id}", get(masks::get_masks))
}
