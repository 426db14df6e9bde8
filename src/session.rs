use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::storage::TokenStore;
use crate::types::{AuthResponse, AuthUser};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// The authenticated surface of the app. Built once at the root and handed
/// to components through context; owns the token store and the API client so
/// nothing else reads the credential ambiently.
#[derive(Clone)]
pub struct Session {
    api: ApiClient,
    tokens: TokenStore,
}

impl Session {
    pub fn from_env() -> Self {
        let config = AppConfig::from_env();
        let tokens = TokenStore::default();
        let api = ApiClient::new(&config, tokens);
        Self { api, tokens }
    }

    pub fn api(&self) -> ApiClient {
        self.api.clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response: AuthResponse = self
            .api
            .post_public("/auth/login", &Credentials { email, password })
            .await?;
        self.tokens.set(&response.access_token);
        tracing::info!("logged in");
        Ok(())
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response: AuthResponse = self
            .api
            .post_public("/auth/register", &Credentials { email, password })
            .await?;
        self.tokens.set(&response.access_token);
        tracing::info!("account registered");
        Ok(())
    }

    pub fn logout(&self) {
        self.tokens.clear();
    }

    /// Pure presence check; the backend is the authority on expiry and
    /// answers 401 when the token has gone stale.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Identity from the stored token's payload. `None` whenever there is no
    /// token or the payload doesn't decode; callers treat that as
    /// "not logged in", never as an error.
    pub fn current_user(&self) -> Option<AuthUser> {
        decode_user(&self.tokens.get()?)
    }
}

/// Decode the middle (payload) segment of a JWT-shaped token into an
/// [`AuthUser`]. `sub` is required; `email` falls back to `sub`.
pub fn decode_user(token: &str) -> Option<AuthUser> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD.decode(payload))
        .ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;
    let id = claims.sub?;
    let email = claims.email.unwrap_or_else(|| id.clone());
    Some(AuthUser { id, email })
}
