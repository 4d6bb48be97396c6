//! Constants used throughout the Smile core crate.
//!
//! Environment variable names, defaults and REST path segments live here so the binaries and the
//! HTTP client agree on them.

/// Environment variable holding the API base URL (scheme, host and port only).
pub const API_BASE_ENV: &str = "SMILE_API_BASE";

/// Environment variable holding the path of the stored access token.
pub const TOKEN_FILE_ENV: &str = "SMILE_TOKEN_FILE";

/// Environment variable holding the per-request timeout in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "SMILE_HTTP_TIMEOUT_SECS";

/// Default API base when no explicit base is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Default location of the stored access token, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = ".smile/access_token";

/// Default per-request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Path prefix shared by every REST endpoint.
pub const API_PREFIX: &str = "api";

/// Collection segment of the read-only procedures catalogue.
pub const PROCEDURES_PATH: &str = "procedures";

/// Message shown with a form whose lookup lists failed to load.
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to load data";
