// Configuration for the Custom Vision prediction endpoint. Loaded once at
// startup and handed to `PredictionClient::new`; nothing else reads the
// environment.

use crate::error::ConfigError;
use std::fmt;

pub const KEY_VAR: &str = "KEY";
pub const ENDPOINT_VAR: &str = "ENDPOINT";
pub const PROJECT_ID_VAR: &str = "PROJECT_ID";
pub const ITERATION_VAR: &str = "PUBLISHED_ITERATION_NAME";

/// Credentials and model selector for the prediction service.
#[derive(Clone)]
pub struct Config {
    pub key: String,
    pub endpoint: String,
    pub project_id: String,
    /// Name under which the trained iteration was published.
    pub iteration_name: String,
}

impl Config {
    /// Read all four variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, with the variable lookup supplied by the caller.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let endpoint = required(ENDPOINT_VAR)?.trim_end_matches('/').to_string();
        Ok(Config {
            key: required(KEY_VAR)?,
            endpoint,
            project_id: required(PROJECT_ID_VAR)?,
            iteration_name: required(ITERATION_VAR)?,
        })
    }
}

/// Load `.env` from the working directory or its parents, if present. Values
/// never override variables that are already set.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("iteration_name", &self.iteration_name)
            .finish()
    }
}
