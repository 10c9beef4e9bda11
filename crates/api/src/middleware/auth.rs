//! Access-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use catalli_core::error::CoreError;
use catalli_db::models::user::User;

use crate::auth::jwt::validate_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// Header older clients send the raw access token in.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Authenticated user, resolved from the access token in the request.
///
/// The token is read from `Authorization: Bearer <token>`, falling back to
/// the `x-access-token` header. The user row is loaded through the store so
/// handlers get the current customization.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)?;

        let claims = validate_access_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user = state
            .store
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid user".into()))?;

        Ok(AuthUser { user })
    }
}

fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    if let Some(value) = headers.get("authorization") {
        let value = value.to_str().unwrap_or_default();
        return value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        });
    }

    headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No token provided".into())))
}
