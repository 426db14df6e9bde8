use crate::config::AppConfig;
use crate::storage::TokenStore;
use crate::types::HealthStatus;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use reqwest::StatusCode;

// ============================================
// Error Types
// ============================================

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend never answered: refused connection, DNS failure, timeout.
    #[error("Cannot connect to the backend at {0}. Please ensure the backend server is running.")]
    Connect(String),
    /// Any 401. The stored token has already been cleared by the time this
    /// variant is observed; the root view reacts by navigating to login.
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    /// Everything the backend answered with a non-success status, normalized
    /// to a human-readable message plus an optional machine code.
    #[error("{message}")]
    Api {
        code: Option<String>,
        message: String,
    },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether the error marks the active conversation as unusable (deleted,
    /// or owned by someone else). Prefers the machine code; falls back to
    /// wording checks for backends that only send bare detail strings.
    pub fn conversation_gone(&self) -> bool {
        match self {
            ApiError::Api {
                code: Some(code), ..
            } => matches!(code.as_str(), "CONVERSATION_NOT_FOUND" | "CONVERSATION_FORBIDDEN"),
            ApiError::Api { code: None, message } => {
                message.contains("not found") || message.contains("does not belong")
            }
            _ => false,
        }
    }
}

// ============================================
// Error body normalization
// ============================================

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Deserialize)]
struct ValidationItem {
    #[serde(default)]
    loc: Vec<Value>,
    #[serde(default)]
    msg: String,
}

/// Turn a non-success response into an [`ApiError`]. Field priority follows
/// the backend's conventions: `detail` (string or validation array), then
/// `message`, then `error`; non-JSON bodies surface as-is.
pub fn normalize_failure(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized;
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        let ErrorBody {
            detail,
            message,
            error,
            code,
        } = parsed;
        let message = detail
            .as_ref()
            .and_then(detail_message)
            .or(message)
            .or(error);
        if let Some(message) = message {
            return ApiError::Api { code, message };
        }
    }

    let message = if body.trim().is_empty() {
        format!("Request failed with status {status}")
    } else {
        body.trim().to_string()
    };
    ApiError::Api {
        code: None,
        message,
    }
}

fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) => Some(text.clone()),
        // 422-style validation arrays flatten into one "field: msg" list.
        Value::Array(items) => {
            let flattened: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let item: ValidationItem = serde_json::from_value(item.clone()).ok()?;
                    let field = item
                        .loc
                        .last()
                        .map(field_label)
                        .unwrap_or_else(|| "field".to_string());
                    Some(format!("{field}: {}", item.msg))
                })
                .collect();
            if flattened.is_empty() {
                Some("Validation error".to_string())
            } else {
                Some(flattened.join(", "))
            }
        }
        _ => None,
    }
}

fn field_label(value: &Value) -> String {
    match value {
        Value::String(name) => name.clone(),
        other => other.to_string(),
    }
}

// ============================================
// Client
// ============================================

/// HTTP client for the todo backend. One instance is shared across the app;
/// it owns bearer attachment and the 401 invariant.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(config: &AppConfig, tokens: TokenStore) -> Self {
        Self {
            http: build_http_client(),
            base_url: config.backend_url.clone(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.execute_json(self.http.get(self.url("/health")), false)
            .await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.execute_json(self.http.get(self.url(path)).query(query), true)
            .await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute_json(self.http.post(self.url(path)).json(body), true)
            .await
    }

    /// POST without bearer attachment, for the credential exchange itself.
    pub(crate) async fn post_public<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute_json(self.http.post(self.url(path)).json(body), false)
            .await
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute_json(self.http.put(self.url(path)).json(body), true)
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.url(path)), true)
            .await
            .map(|_| ())
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        attach_bearer: bool,
    ) -> Result<T, ApiError> {
        let response = self.execute(builder, attach_bearer).await?;
        response.json::<T>().await.map_err(|err| ApiError::Api {
            code: None,
            message: format!("Unexpected response from backend: {err}"),
        })
    }

    async fn execute(
        &self,
        builder: RequestBuilder,
        attach_bearer: bool,
    ) -> Result<reqwest::Response, ApiError> {
        let builder = if attach_bearer {
            match self.tokens.get() {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            }
        } else {
            builder
        };

        let response = builder
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Hard invariant: a 401 anywhere ends the session.
            self.tokens.clear();
            tracing::warn!("unauthorized response, stored token cleared");
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = normalize_failure(status, &body);
            tracing::warn!(%status, "request failed: {error}");
            return Err(error);
        }

        Ok(response)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        #[cfg(not(target_arch = "wasm32"))]
        let unreachable = err.is_connect() || err.is_timeout();
        #[cfg(target_arch = "wasm32")]
        let unreachable = err.is_request();

        if unreachable {
            tracing::warn!("backend unreachable: {err}");
            return ApiError::Connect(self.base_url.clone());
        }
        ApiError::Api {
            code: None,
            message: err.to_string(),
        }
    }
}

fn build_http_client() -> reqwest::Client {
    #[cfg(not(target_arch = "wasm32"))]
    {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(
                crate::config::REQUEST_TIMEOUT_SECS,
            ))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }
    #[cfg(target_arch = "wasm32")]
    {
        // Browsers govern their own fetch timeouts.
        reqwest::Client::new()
    }
}
