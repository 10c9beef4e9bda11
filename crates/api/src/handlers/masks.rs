//! Handler for `GET /public/masks/{id}`.

use axum::extract::{Path, State};
use axum::Json;
use catalli_core::error::CoreError;
use catalli_core::masks::png_data_uri;
use catalli_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Both mask layers as `data:image/png;base64,...` URIs.
#[derive(Debug, Serialize)]
pub struct MasksResponse {
    pub mask0: String,
    pub mask1: String,
}

/// GET /api/v1/public/masks/{id}
///
/// Public so the game can fetch any player's masks. Users who never saved a
/// customization have none; clients fall back to a predefined character.
pub async fn get_masks(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MasksResponse>>> {
    let user = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    let (mask0, mask1) = user
        .masks()
        .ok_or_else(|| AppError::BadRequest("Missing masks".into()))?;

    Ok(Json(DataResponse {
        data: MasksResponse {
            mask0: png_data_uri(mask0),
            mask1: png_data_uri(mask1),
        },
    }))
}
