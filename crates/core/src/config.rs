//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the client and the
//! view-models. Helpers here take the raw `Option<String>` values rather than reading the process
//! environment, so tests can resolve configuration without touching global state.

use crate::constants::{DEFAULT_API_BASE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TOKEN_FILE};
use crate::validation::validate_api_base;
use crate::{ClientError, ClientResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    api_base: String,
    token_file: PathBuf,
    http_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The API base is validated and stored without trailing slashes.
    pub fn new(api_base: &str, token_file: PathBuf, http_timeout: Duration) -> ClientResult<Self> {
        validate_api_base(api_base)?;

        if http_timeout.is_zero() {
            return Err(ClientError::InvalidInput(
                "HTTP timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token_file,
            http_timeout,
        })
    }

    /// Resolve a configuration from raw environment values, applying defaults for absent ones.
    pub fn from_env_values(
        api_base: Option<String>,
        token_file: Option<String>,
        http_timeout_secs: Option<String>,
    ) -> ClientResult<Self> {
        let api_base = api_base_from_env_value(api_base);
        let token_file = token_file_from_env_value(token_file);
        let http_timeout = http_timeout_from_env_value(http_timeout_secs)?;
        Self::new(&api_base, token_file, http_timeout)
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn token_file(&self) -> &Path {
        &self.token_file
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    pub fn with_api_base(self, api_base: &str) -> ClientResult<Self> {
        Self::new(api_base, self.token_file, self.http_timeout)
    }

    pub fn with_token_file(mut self, token_file: PathBuf) -> Self {
        self.token_file = token_file;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the API base from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default local development server.
pub fn api_base_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Resolve the token file location from an optional string value.
pub fn token_file_from_env_value(value: Option<String>) -> PathBuf {
    non_blank(value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE))
}

/// Parse the request timeout (whole seconds) from an optional string value.
pub fn http_timeout_from_env_value(value: Option<String>) -> ClientResult<Duration> {
    let Some(raw) = non_blank(value) else {
        return Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    };

    let secs: u64 = raw.parse().map_err(|_| {
        ClientError::InvalidInput(format!(
            "HTTP timeout must be a whole number of seconds, got: '{}'",
            raw
        ))
    })?;

    Ok(Duration::from_secs(secs))
}
