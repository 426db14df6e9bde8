use std::env;

/// Fallback when neither the environment nor a config file names the backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Generous because a chat turn can sit behind the backend's model gateway
/// for tens of seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
}

impl AppConfig {
    /// Resolve configuration from the environment. `main` has already layered
    /// `.env` / the bundled config into the process environment.
    pub fn from_env() -> Self {
        let backend_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_strips_trailing_slashes() {
        // SAFETY: this is the only test touching BACKEND_URL
        unsafe { std::env::set_var("BACKEND_URL", "http://example.test:9000/") };
        let config = AppConfig::from_env();
        assert_eq!(config.backend_url, "http://example.test:9000");
        unsafe { std::env::remove_var("BACKEND_URL") };
    }
}
