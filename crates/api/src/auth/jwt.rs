//! Access and game token generation/validation.
//!
//! Both token kinds are HS512-signed JWTs carrying a [`Claims`] payload, each
//! signed with its own secret. Access tokens authorize customization calls
//! and live for days. Game tokens only prove identity to the game backend and
//! expire within seconds.

use catalli_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the two token kinds a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Game,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub typ: TokenType,
    /// Expiration time (UTC Unix timestamp, seconds).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp, seconds).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// A freshly signed token and its expiry as Unix milliseconds.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires: i64,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for access tokens.
    pub access_secret: String,
    /// HMAC secret for game tokens.
    pub game_secret: String,
    /// Access token lifetime in days (default: 60).
    pub access_token_expiry_days: i64,
    /// Game token lifetime in seconds (default: 30).
    pub game_token_expiry_secs: i64,
}

/// Default access token expiry in days.
const DEFAULT_ACCESS_EXPIRY_DAYS: i64 = 60;
/// Default game token expiry in seconds.
const DEFAULT_GAME_EXPIRY_SECS: i64 = 30;

const ALGORITHM: Algorithm = Algorithm::HS512;

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `ACCESS_TOKEN_SECRET`      | **yes**  | --      |
    /// | `GAME_TOKEN_SECRET`        | **yes**  | --      |
    /// | `ACCESS_TOKEN_EXPIRY_DAYS` | no       | `60`    |
    /// | `GAME_TOKEN_EXPIRY_SECS`   | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if either secret is missing or empty.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .expect("ACCESS_TOKEN_SECRET must be set in the environment");
        assert!(!access_secret.is_empty(), "ACCESS_TOKEN_SECRET must not be empty");

        let game_secret = std::env::var("GAME_TOKEN_SECRET")
            .expect("GAME_TOKEN_SECRET must be set in the environment");
        assert!(!game_secret.is_empty(), "GAME_TOKEN_SECRET must not be empty");

        let access_token_expiry_days: i64 = std::env::var("ACCESS_TOKEN_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_DAYS.to_string())
            .parse()
            .expect("ACCESS_TOKEN_EXPIRY_DAYS must be a valid i64");

        let game_token_expiry_secs: i64 = std::env::var("GAME_TOKEN_EXPIRY_SECS")
            .unwrap_or_else(|_| DEFAULT_GAME_EXPIRY_SECS.to_string())
            .parse()
            .expect("GAME_TOKEN_EXPIRY_SECS must be a valid i64");

        Self {
            access_secret,
            game_secret,
            access_token_expiry_days,
            game_token_expiry_secs,
        }
    }
}

/// Generate an access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    issue(
        user_id,
        TokenType::Access,
        &config.access_secret,
        config.access_token_expiry_days * 24 * 60 * 60,
    )
}

/// Generate a short-lived game token for the given user.
pub fn generate_game_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    issue(
        user_id,
        TokenType::Game,
        &config.game_secret,
        config.game_token_expiry_secs,
    )
}

/// Validate an access token, returning the embedded [`Claims`].
pub fn validate_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    validate(token, TokenType::Access, &config.access_secret)
}

/// Validate a game token, returning the embedded [`Claims`].
pub fn validate_game_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    validate(token, TokenType::Game, &config.game_secret)
}

fn issue(
    user_id: DbId,
    typ: TokenType,
    secret: &str,
    lifetime_secs: i64,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + lifetime_secs;

    let claims = Claims {
        sub: user_id,
        typ,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(IssuedToken {
        token,
        expires: exp * 1000,
    })
}

fn validate(
    token: &str,
    expected: TokenType,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(ALGORITHM);
    // Game tokens live for seconds; the default 60s leeway would double that.
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    if token_data.claims.typ != expected {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(token_data.claims)
}
