//! Handler for `GET /auth/gameToken`.

use axum::extract::State;
use axum::Json;

use crate::auth::jwt::{generate_game_token, IssuedToken};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/auth/gameToken
///
/// A short-lived token the client hands to the game backend to prove who it
/// is. Stateless, nothing is stored.
pub async fn get_game_token(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<IssuedToken>>> {
    let issued = generate_game_token(auth.user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(DataResponse { data: issued }))
}
