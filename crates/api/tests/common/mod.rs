#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::types::Json;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use catalli_api::auth::jwt::{generate_access_token, JwtConfig};
use catalli_api::config::{CatalogConfig, ServerConfig};
use catalli_api::identity::{
    ExternalProfile, FacebookConfig, IdentityError, IdentityProvider, LongLivedToken,
};
use catalli_api::routes;
use catalli_api::state::AppState;
use catalli_core::catalog::{OptionCatalog, OptionGroup};
use catalli_core::masks::MaskSettings;
use catalli_core::test_support::write_artwork;
use catalli_core::types::DbId;
use catalli_db::models::user::{ExternalIdentity, SaveCustomization, User};
use catalli_db::store::UserStore;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with known secrets and a 30-second timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            access_secret: "test-access-secret-that-is-long-enough".to_string(),
            game_secret: "test-game-secret-that-is-long-enough".to_string(),
            access_token_expiry_days: 60,
            game_token_expiry_secs: 30,
        },
        facebook: FacebookConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            api_version: "v2.5".to_string(),
            graph_url: "http://127.0.0.1:9".to_string(),
        },
        catalog: CatalogConfig {
            metadata_path: shipped_metadata_path(),
            image_dir: PathBuf::from("unused"),
            image_extension: ".png".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

pub fn shipped_metadata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../resources/metadata.json")
}

/// The shipped catalog with generated artwork, built once per test binary.
///
/// Artwork is decoded at load time, so the temporary directory can go away
/// as soon as the catalog exists.
pub fn test_catalog() -> Arc<OptionCatalog> {
    static CATALOG: OnceLock<Arc<OptionCatalog>> = OnceLock::new();
    CATALOG
        .get_or_init(|| {
            let raw = std::fs::read(shipped_metadata_path()).unwrap();
            let groups: Vec<OptionGroup> = serde_json::from_slice(&raw).unwrap();
            let dir = tempfile::tempdir().unwrap();
            write_artwork(dir.path(), &groups);
            Arc::new(OptionCatalog::load(groups, dir.path(), "png").unwrap())
        })
        .clone()
}

// ---------------------------------------------------------------------------
// In-memory user store
// ---------------------------------------------------------------------------

/// `UserStore` holding users in a vector; ids start at 1.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn user(&self, id: DbId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Insert a user directly, as if they had logged in before.
    pub fn seed(&self, external_user_id: &str) -> User {
        let mut users = self.users.lock().unwrap();
        let now = chrono::Utc::now();
        let user = User {
            id: users.len() as DbId + 1,
            mask0: None,
            mask1: None,
            char_parts: Json(Vec::new()),
            external_user_id: external_user_id.to_string(),
            long_lived_token: Some(format!("long-{external_user_id}")),
            long_lived_token_expire: Some(5_183_944),
            profile_data: Some(serde_json::json!({ "id": external_user_id })),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        user
    }

    fn update<F>(&self, id: DbId, apply: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.lock().unwrap();
        let user = users.iter_mut().find(|u| u.id == id)?;
        apply(user);
        user.updated_at = chrono::Utc::now();
        Some(user.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        Ok(self.user(id))
    }

    async fn find_by_external_id(
        &self,
        external_user_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.external_user_id == external_user_id)
            .cloned())
    }

    async fn create(&self, identity: &ExternalIdentity) -> Result<User, sqlx::Error> {
        if self.find_by_external_id(&identity.external_user_id).await?.is_some() {
            return Err(sqlx::Error::Protocol("duplicate external_user_id".into()));
        }
        let seeded = self.seed(&identity.external_user_id);
        Ok(self
            .update(seeded.id, |user| apply_identity(user, identity))
            .unwrap_or(seeded))
    }

    async fn update_identity(
        &self,
        id: DbId,
        identity: &ExternalIdentity,
    ) -> Result<Option<User>, sqlx::Error> {
        Ok(self.update(id, |user| apply_identity(user, identity)))
    }

    async fn save_customization(
        &self,
        id: DbId,
        input: &SaveCustomization,
    ) -> Result<Option<User>, sqlx::Error> {
        Ok(self.update(id, |user| {
            user.char_parts = Json(input.char_parts.clone());
            user.mask0 = Some(input.mask0.clone());
            user.mask1 = Some(input.mask1.clone());
        }))
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

fn apply_identity(user: &mut User, identity: &ExternalIdentity) {
    user.external_user_id = identity.external_user_id.clone();
    user.long_lived_token = Some(identity.long_lived_token.clone());
    user.long_lived_token_expire = Some(identity.long_lived_token_expire);
    user.profile_data = Some(identity.profile_data.clone());
}

// ---------------------------------------------------------------------------
// Stub identity provider
// ---------------------------------------------------------------------------

/// Accepts short-lived tokens of the form `short-<user>`; the profile of
/// `<user>` has id `<user>`. Everything else is refused like the Graph API
/// refuses an invalid token.
pub struct StubIdentity;

pub const STUB_TOKEN_LIFETIME: i64 = 5_183_944;

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn exchange_token(&self, short_lived: &str) -> Result<LongLivedToken, IdentityError> {
        match short_lived.strip_prefix("short-") {
            Some(user) => Ok(LongLivedToken {
                token: format!("long-{user}"),
                expires_in: STUB_TOKEN_LIFETIME,
            }),
            None => Err(IdentityError::Rejected {
                status: 400,
                body: r#"{"error":{"message":"Invalid OAuth access token."}}"#.to_string(),
            }),
        }
    }

    async fn fetch_profile(&self, long_lived: &str) -> Result<ExternalProfile, IdentityError> {
        let user = long_lived
            .strip_prefix("long-")
            .ok_or_else(|| IdentityError::InvalidResponse("unknown token".into()))?;
        Ok(ExternalProfile {
            id: user.to_string(),
            data: serde_json::json!({ "id": user, "first_name": "Test" }),
        })
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers on top of
/// the given store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(store: Arc<MemoryUserStore>) -> Router {
    let state = AppState {
        store,
        catalog: test_catalog(),
        identity: Arc::new(StubIdentity),
        config: Arc::new(test_config()),
        mask_settings: MaskSettings::default(),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-access-token"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// A fresh store and an app over it.
pub fn test_app() -> (Arc<MemoryUserStore>, Router) {
    let store = Arc::new(MemoryUserStore::default());
    let app = build_test_app(Arc::clone(&store));
    (store, app)
}

/// Signed access token for `user_id` using the test secrets.
pub fn access_token(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt)
        .expect("token generation should succeed")
        .token
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
