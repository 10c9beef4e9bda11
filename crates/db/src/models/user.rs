//! User entity model and DTOs.

use catalli_core::customization::CharPart;
use catalli_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Holds the identity provider's long-lived token -- never serialize this to
/// API responses directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    /// PNG of the layer drawn under the animation layer.
    pub mask0: Option<Vec<u8>>,
    /// PNG of the layer drawn over the animation layer.
    pub mask1: Option<Vec<u8>>,
    pub char_parts: Json<Vec<CharPart>>,
    pub external_user_id: String,
    pub long_lived_token: Option<String>,
    /// Lifetime of `long_lived_token` in seconds, as reported by the provider.
    pub long_lived_token_expire: Option<i64>,
    pub profile_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The saved selection; empty if the user never saved one.
    pub fn customization(&self) -> &[CharPart] {
        &self.char_parts.0
    }

    /// Both mask layers, if a customization has been saved.
    pub fn masks(&self) -> Option<(&[u8], &[u8])> {
        match (&self.mask0, &self.mask1) {
            (Some(mask0), Some(mask1)) => Some((mask0, mask1)),
            _ => None,
        }
    }
}

/// Identity provider data stored with a user, refreshed on every login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    pub external_user_id: String,
    pub long_lived_token: String,
    pub long_lived_token_expire: i64,
    pub profile_data: serde_json::Value,
}

/// DTO for persisting a validated customization with its rendered masks.
#[derive(Debug, Clone)]
pub struct SaveCustomization {
    pub char_parts: Vec<CharPart>,
    pub mask0: Vec<u8>,
    pub mask1: Vec<u8>,
}
