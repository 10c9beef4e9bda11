//! Route definitions for the `/auth` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{customization, game_token};
use crate::state::AppState;

/// Routes mounted at `/auth`. Every handler takes an `AuthUser`.
///
/// ```text
/// GET  /charCustomization         -> get_customization
/// POST /charCustomization         -> save_customization
/// GET  /charCustomization/random  -> random_customization
/// GET  /gameToken                 -> get_game_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/charCustomization",
            get(customization::get_customization).post(customization::save_customization),
        )
        .route(
            "/charCustomization/random",
            get(customization::random_customization),
        )
        .route("/gameToken", get(game_token::get_game_token))
}
