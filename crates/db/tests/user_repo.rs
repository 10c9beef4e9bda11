//! Integration tests for the `users` repository.
//!
//! These run against a real PostgreSQL database (`DATABASE_URL`); each test
//! gets a fresh database with the crate's migrations applied. Run them with
//! `cargo test -p catalli-db -- --ignored`.

use catalli_core::customization::CharPart;
use catalli_db::models::user::{ExternalIdentity, SaveCustomization};
use catalli_db::repositories::UserRepo;
use catalli_db::store::{PgUserStore, UserStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn identity(external_user_id: &str) -> ExternalIdentity {
    ExternalIdentity {
        external_user_id: external_user_id.to_string(),
        long_lived_token: format!("token-{external_user_id}"),
        long_lived_token_expire: 5_183_944,
        profile_data: serde_json::json!({ "id": external_user_id, "name": "Test User" }),
    }
}

fn customization() -> SaveCustomization {
    SaveCustomization {
        char_parts: vec![
            CharPart::colored(1000, "#935837"),
            CharPart::new(2000),
            CharPart::new(4000),
        ],
        mask0: vec![0x89, b'P', b'N', b'G', 0],
        mask1: vec![0x89, b'P', b'N', b'G', 1],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_starts_without_customization(pool: PgPool) {
    let user = UserRepo::create(&pool, &identity("fb-1")).await.unwrap();

    assert_eq!(user.external_user_id, "fb-1");
    assert_eq!(user.long_lived_token.as_deref(), Some("token-fb-1"));
    assert_eq!(user.long_lived_token_expire, Some(5_183_944));
    assert!(user.customization().is_empty());
    assert!(user.masks().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_by_id_and_external_id(pool: PgPool) {
    let created = UserRepo::create(&pool, &identity("fb-2")).await.unwrap();

    let by_id = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(by_id.external_user_id, "fb-2");

    let by_external = UserRepo::find_by_external_id(&pool, "fb-2")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_external.id, created.id);

    assert!(UserRepo::find_by_id(&pool, created.id + 1000).await.unwrap().is_none());
    assert!(UserRepo::find_by_external_id(&pool, "nobody").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn external_user_id_is_unique(pool: PgPool) {
    UserRepo::create(&pool, &identity("fb-dup")).await.unwrap();
    let err = UserRepo::create(&pool, &identity("fb-dup")).await.unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_external_user_id"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_identity_replaces_token(pool: PgPool) {
    let created = UserRepo::create(&pool, &identity("fb-3")).await.unwrap();

    let mut refreshed = identity("fb-3");
    refreshed.long_lived_token = "rotated".to_string();
    let updated = UserRepo::update_identity(&pool, created.id, &refreshed)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.long_lived_token.as_deref(), Some("rotated"));
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_customization_persists_parts_and_masks(pool: PgPool) {
    let created = UserRepo::create(&pool, &identity("fb-4")).await.unwrap();
    let input = customization();

    UserRepo::save_customization(&pool, created.id, &input)
        .await
        .unwrap()
        .unwrap();

    let user = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(user.customization(), input.char_parts.as_slice());
    let (mask0, mask1) = user.masks().unwrap();
    assert_eq!(mask0, input.mask0.as_slice());
    assert_eq!(mask1, input.mask1.as_slice());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_customization_for_missing_user_returns_none(pool: PgPool) {
    let saved = UserRepo::save_customization(&pool, 42, &customization())
        .await
        .unwrap();
    assert!(saved.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn pg_store_delegates_to_repository(pool: PgPool) {
    let store = PgUserStore::new(pool);
    store.health_check().await.unwrap();

    let user = store.create(&identity("fb-5")).await.unwrap();
    let found = store.find_by_external_id("fb-5").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
}
