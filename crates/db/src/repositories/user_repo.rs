//! Repository for the `users` table.

use catalli_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::user::{ExternalIdentity, SaveCustomization, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, mask0, mask1, char_parts, external_user_id, long_lived_token, \
                       long_lived_token_expire, profile_data, created_at, updated_at";

/// Provides persistence operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with no customization, returning the created row.
    pub async fn create(pool: &PgPool, identity: &ExternalIdentity) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (external_user_id, long_lived_token, long_lived_token_expire, profile_data)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&identity.external_user_id)
            .bind(&identity.long_lived_token)
            .bind(identity.long_lived_token_expire)
            .bind(&identity.profile_data)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by the identity provider's user id.
    pub async fn find_by_external_id(
        pool: &PgPool,
        external_user_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE external_user_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(external_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the stored identity provider data.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_identity(
        pool: &PgPool,
        id: DbId,
        identity: &ExternalIdentity,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                external_user_id = $2,
                long_lived_token = $3,
                long_lived_token_expire = $4,
                profile_data = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&identity.external_user_id)
            .bind(&identity.long_lived_token)
            .bind(identity.long_lived_token_expire)
            .bind(&identity.profile_data)
            .fetch_optional(pool)
            .await
    }

    /// Store a customization and both of its masks in one statement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn save_customization(
        pool: &PgPool,
        id: DbId,
        input: &SaveCustomization,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                char_parts = $2,
                mask0 = $3,
                mask1 = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(Json(&input.char_parts))
            .bind(&input.mask0)
            .bind(&input.mask1)
            .fetch_optional(pool)
            .await
    }
}
