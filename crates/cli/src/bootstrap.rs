//! Process start-up shared by the binaries.

use smile_core::constants::{API_BASE_ENV, HTTP_TIMEOUT_ENV, TOKEN_FILE_ENV};
use smile_core::{ClientError, ClientResult, CoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber: `RUST_LOG` directives plus `smile=info`.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("smile=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

/// Resolves [`CoreConfig`] from the process environment (after `.env` has been loaded).
pub fn config_from_env() -> ClientResult<CoreConfig> {
    CoreConfig::from_env_values(
        std::env::var(API_BASE_ENV).ok(),
        std::env::var(TOKEN_FILE_ENV).ok(),
        std::env::var(HTTP_TIMEOUT_ENV).ok(),
    )
}

/// Parses a `name=value` form assignment. The value may be empty or contain `=`.
pub fn parse_assignment(raw: &str) -> ClientResult<(String, String)> {
    let (name, value) = raw.split_once('=').ok_or_else(|| {
        ClientError::InvalidInput(format!("expected name=value, got: '{}'", raw))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::InvalidInput(format!(
            "field name cannot be empty in '{}'",
            raw
        )));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Advice for errors that only a fresh token can fix.
pub fn login_hint(err: &ClientError) -> Option<&'static str> {
    match err {
        ClientError::MissingToken | ClientError::SessionExpired(_) => {
            Some("store a token with `smile token set <TOKEN>`")
        }
        e if e.is_unauthorised() => {
            Some("the server rejected the stored token; store a fresh one with `smile token set <TOKEN>`")
        }
        _ => None,
    }
}
