//! Handlers for the authenticated user's character customization.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use catalli_core::customization::Customization;
use catalli_core::error::CoreError;
use catalli_core::masks::{render_masks, MaskPair};
use catalli_core::predefined;
use catalli_core::validation::validate_submission;
use catalli_db::models::user::SaveCustomization;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/auth/charCustomization
///
/// The saved customization, or a random predefined one if none was saved.
pub async fn get_customization(auth: AuthUser) -> Json<DataResponse<Customization>> {
    let saved = auth.user.customization();
    let data = if saved.is_empty() {
        predefined::random_customization()
    } else {
        saved.to_vec()
    };
    Json(DataResponse { data })
}

/// POST /api/v1/auth/charCustomization
///
/// Validate the submitted selection, render both masks, and store all three
/// together. Responds with the stored selection.
pub async fn save_customization(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<Customization>>> {
    let user_id = auth.user.id;
    let parts = validate_submission(&body, &state.catalog).map_err(CoreError::from)?;

    let masks = render(&state, parts.clone()).await?;

    let input = SaveCustomization {
        char_parts: parts,
        mask0: masks.mask0,
        mask1: masks.mask1,
    };
    let saved = state
        .store
        .save_customization(user_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    tracing::info!(user_id, parts = input.char_parts.len(), "Saved character customization");

    Ok(Json(DataResponse {
        data: saved.customization().to_vec(),
    }))
}

/// GET /api/v1/auth/charCustomization/random
///
/// A random predefined customization. Not saved.
pub async fn random_customization(_auth: AuthUser) -> Json<DataResponse<Customization>> {
    Json(DataResponse {
        data: predefined::random_customization(),
    })
}

/// Compositing is CPU-bound; keep it off the async workers.
async fn render(state: &AppState, parts: Customization) -> AppResult<MaskPair> {
    let catalog = Arc::clone(&state.catalog);
    let settings = state.mask_settings;

    tokio::task::spawn_blocking(move || render_masks(&parts, &catalog, &settings))
        .await
        .map_err(|e| AppError::InternalError(format!("Mask rendering task failed: {e}")))?
        .map_err(|e| AppError::Core(CoreError::from(e)))
}
