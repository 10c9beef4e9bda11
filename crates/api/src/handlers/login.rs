//! Handler for `POST /public/loginWithFacebook`.

use axum::extract::State;
use axum::Json;
use catalli_core::error::CoreError;
use catalli_core::types::DbId;
use catalli_db::models::user::ExternalIdentity;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::identity::{IdentityError, IdentityProvider};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /public/loginWithFacebook`.
#[derive(Debug, Deserialize)]
pub struct FacebookLoginRequest {
    #[serde(default)]
    pub fb_access_token: Option<String>,
}

/// Successful login: the access token, its expiry in Unix milliseconds, and
/// the internal user id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires: i64,
    pub user_id: DbId,
}

/// POST /api/v1/public/loginWithFacebook
///
/// Exchange the client's short-lived Facebook token for a long-lived one,
/// fetch the profile, then create the user or refresh its stored identity.
/// Returns a fresh access token either way.
pub async fn login_with_facebook(
    State(state): State<AppState>,
    Json(input): Json<FacebookLoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let short_lived = input
        .fb_access_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Facebook short living access token".into(),
            ))
        })?;

    let identity = fetch_identity(state.identity.as_ref(), short_lived)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Facebook login failed");
            AppError::Core(CoreError::Unauthorized(
                "Unable to login with Facebook".into(),
            ))
        })?;

    let user = match state
        .store
        .find_by_external_id(&identity.external_user_id)
        .await?
    {
        Some(existing) => state
            .store
            .update_identity(existing.id, &identity)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: existing.id,
            })?,
        None => {
            let created = state.store.create(&identity).await?;
            tracing::info!(user_id = created.id, "Created user from Facebook login");
            created
        }
    };

    let issued = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in with Facebook");

    Ok(Json(DataResponse {
        data: LoginResponse {
            token: issued.token,
            expires: issued.expires,
            user_id: user.id,
        },
    }))
}

async fn fetch_identity(
    provider: &dyn IdentityProvider,
    short_lived: &str,
) -> Result<ExternalIdentity, IdentityError> {
    let long_lived = provider.exchange_token(short_lived).await?;
    let profile = provider.fetch_profile(&long_lived.token).await?;

    Ok(ExternalIdentity {
        external_user_id: profile.id,
        long_lived_token: long_lived.token,
        long_lived_token_expire: long_lived.expires_in,
        profile_data: profile.data,
    })
}
