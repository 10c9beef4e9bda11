//! Object-safe persistence seam.
//!
//! Handlers depend on [`UserStore`] rather than on a concrete pool so the
//! HTTP layer can be exercised against an in-memory implementation.

use async_trait::async_trait;
use catalli_core::types::DbId;

use crate::models::user::{ExternalIdentity, SaveCustomization, User};
use crate::repositories::UserRepo;
use crate::DbPool;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error>;

    async fn find_by_external_id(
        &self,
        external_user_id: &str,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn create(&self, identity: &ExternalIdentity) -> Result<User, sqlx::Error>;

    async fn update_identity(
        &self,
        id: DbId,
        identity: &ExternalIdentity,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_customization(
        &self,
        id: DbId,
        input: &SaveCustomization,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// [`UserStore`] backed by PostgreSQL through [`UserRepo`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_id(&self.pool, id).await
    }

    async fn find_by_external_id(
        &self,
        external_user_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_external_id(&self.pool, external_user_id).await
    }

    async fn create(&self, identity: &ExternalIdentity) -> Result<User, sqlx::Error> {
        UserRepo::create(&self.pool, identity).await
    }

    async fn update_identity(
        &self,
        id: DbId,
        identity: &ExternalIdentity,
    ) -> Result<Option<User>, sqlx::Error> {
        UserRepo::update_identity(&self.pool, id, identity).await
    }

    async fn save_customization(
        &self,
        id: DbId,
        input: &SaveCustomization,
    ) -> Result<Option<User>, sqlx::Error> {
        UserRepo::save_customization(&self.pool, id, input).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
