//! Input validation utilities.
//!
//! Checks applied once at startup to values that end up embedded in request URLs.

use crate::{ClientError, ClientResult};

/// Validates that an API base is an absolute `http`/`https` origin usable as a URL prefix.
///
/// Rules:
/// - must not be empty or whitespace-only
/// - must start with `http://` or `https://` and name a host
/// - ASCII only, no whitespace, no query string or fragment
///
/// # Errors
///
/// Returns `ClientError::InvalidInput` if the base is unusable.
pub fn validate_api_base(base: &str) -> ClientResult<()> {
    const MAX_BASE_LEN: usize = 2048;

    if base.trim().is_empty() {
        return Err(ClientError::InvalidInput("API base cannot be empty".into()));
    }

    if base.len() > MAX_BASE_LEN {
        return Err(ClientError::InvalidInput(format!(
            "API base exceeds maximum length of {} characters",
            MAX_BASE_LEN
        )));
    }

    let rest = base
        .strip_prefix("http://")
        .or_else(|| base.strip_prefix("https://"))
        .ok_or_else(|| {
            ClientError::InvalidInput(format!(
                "API base must start with http:// or https://, got: '{}'",
                base
            ))
        })?;

    if rest.trim_matches('/').is_empty() {
        return Err(ClientError::InvalidInput(
            "API base must include a host".into(),
        ));
    }

    if !base.is_ascii() || base.chars().any(|c| c.is_whitespace()) {
        return Err(ClientError::InvalidInput(
            "API base must be ASCII without whitespace".into(),
        ));
    }

    if base.contains('?') || base.contains('#') {
        return Err(ClientError::InvalidInput(
            "API base must not carry a query string or fragment".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_local_origin() {
        assert!(validate_api_base("http://127.0.0.1:8000").is_ok());
        assert!(validate_api_base("https://clinic.example.org/").is_ok());
    }

    #[test]
    fn rejects_missing_scheme() {
        let err = validate_api_base("127.0.0.1:8000").unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn rejects_scheme_without_host() {
        assert!(validate_api_base("http://").is_err());
        assert!(validate_api_base("https:///").is_err());
    }

    #[test]
    fn rejects_whitespace_and_query() {
        assert!(validate_api_base("http://host name").is_err());
        assert!(validate_api_base("http://host/?x=1").is_err());
        assert!(validate_api_base("   ").is_err());
    }
}
