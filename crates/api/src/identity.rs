//! External identity provider (Facebook Graph API) client.
//!
//! Login trades the client's short-lived provider token for a long-lived one
//! and then reads the user's public profile with it. Handlers use the
//! [`IdentityProvider`] trait so tests can substitute a stub.

use async_trait::async_trait;
use serde::Deserialize;

/// Profile fields requested from the Graph API `/me` endpoint.
const PROFILE_FIELDS: &str = "id,first_name,last_name,age_range,link,gender,locale,timezone,\
                              updated_time,verified,email,picture";

/// A long-lived provider token and its lifetime in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongLivedToken {
    pub token: String,
    pub expires_in: i64,
}

/// The provider's view of a user: its id plus the raw profile document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalProfile {
    pub id: String,
    pub data: serde_json::Value,
}

/// Errors from the identity provider layer.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Identity provider error ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The provider answered 2xx but without the fields we need.
    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a short-lived client token for a long-lived one.
    async fn exchange_token(&self, short_lived: &str) -> Result<LongLivedToken, IdentityError>;

    /// Fetch the profile of the user owning `long_lived`.
    async fn fetch_profile(&self, long_lived: &str) -> Result<ExternalProfile, IdentityError>;
}

/// Facebook application credentials and Graph API location.
#[derive(Debug, Clone)]
pub struct FacebookConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Graph API version path segment (default: `v2.5`).
    pub api_version: String,
    /// Graph API origin (default: `https://graph.facebook.com`).
    pub graph_url: String,
}

impl FacebookConfig {
    /// | Env Var                  | Required | Default                      |
    /// |--------------------------|----------|------------------------------|
    /// | `FACEBOOK_CLIENT_ID`     | **yes**  | --                           |
    /// | `FACEBOOK_CLIENT_SECRET` | **yes**  | --                           |
    /// | `FACEBOOK_API_VERSION`   | no       | `v2.5`                       |
    /// | `FACEBOOK_GRAPH_URL`     | no       | `https://graph.facebook.com` |
    ///
    /// # Panics
    ///
    /// Panics if the client id or secret is not set.
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var("FACEBOOK_CLIENT_ID")
                .expect("FACEBOOK_CLIENT_ID must be set in the environment"),
            client_secret: std::env::var("FACEBOOK_CLIENT_SECRET")
                .expect("FACEBOOK_CLIENT_SECRET must be set in the environment"),
            api_version: std::env::var("FACEBOOK_API_VERSION").unwrap_or_else(|_| "v2.5".into()),
            graph_url: std::env::var("FACEBOOK_GRAPH_URL")
                .unwrap_or_else(|_| "https://graph.facebook.com".into()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}{}",
            self.graph_url.trim_end_matches('/'),
            self.api_version,
            path
        )
    }
}

/// Body of a successful `/oauth/access_token` exchange.
#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

/// [`IdentityProvider`] backed by the Facebook Graph API.
pub struct FacebookClient {
    client: reqwest::Client,
    config: FacebookConfig,
}

impl FacebookClient {
    pub fn new(config: FacebookConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, IdentityError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl IdentityProvider for FacebookClient {
    async fn exchange_token(&self, short_lived: &str) -> Result<LongLivedToken, IdentityError> {
        let response = self
            .client
            .get(self.config.endpoint("/oauth/access_token"))
            .query(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "fb_exchange_token"),
                ("fb_exchange_token", short_lived),
            ])
            .send()
            .await?;

        let body: TokenExchangeResponse = Self::ensure_success(response).await?.json().await?;
        long_lived_token(body)
    }

    async fn fetch_profile(&self, long_lived: &str) -> Result<ExternalProfile, IdentityError> {
        let response = self
            .client
            .get(self.config.endpoint("/me"))
            .query(&[("fields", PROFILE_FIELDS), ("access_token", long_lived)])
            .send()
            .await?;

        let body: serde_json::Value = Self::ensure_success(response).await?.json().await?;
        external_profile(body)
    }
}

fn long_lived_token(body: TokenExchangeResponse) -> Result<LongLivedToken, IdentityError> {
    match (body.access_token, body.expires_in) {
        (Some(token), Some(expires_in)) if !token.is_empty() => Ok(LongLivedToken {
            token,
            expires_in,
        }),
        _ => Err(IdentityError::InvalidResponse(
            "token exchange returned no access_token or expires_in".into(),
        )),
    }
}

/// The Graph API returns ids as strings; accept numbers too.
fn external_profile(data: serde_json::Value) -> Result<ExternalProfile, IdentityError> {
    let id = match data.get("id") {
        Some(serde_json::Value::String(id)) if !id.is_empty() => id.clone(),
        Some(serde_json::Value::Number(id)) => id.to_string(),
        _ => return Err(IdentityError::InvalidResponse("profile has no id".into())),
    };
    Ok(ExternalProfile { id, data })
}
