//! Credentials for the clinic API.
//!
//! A [`Session`] wraps the bearer token and is handed explicitly to every remote call. Expiry is
//! checked before a request is dispatched: when the token is a JWT its `exp` claim is decoded
//! up front, so an expired credential fails locally instead of as a server rejection.
//!
//! The token itself is persisted by a [`TokenStore`], a single file written by the login step
//! and removed on logout.

use crate::{ClientError, ClientResult};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Bearer credential plus its known expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct JwtClaims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Decodes the `exp` claim of a JWT. Opaque tokens yield `None`.
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: JwtClaims = serde_json::from_slice(&bytes).ok()?;
    DateTime::<Utc>::from_timestamp(claims.exp?, 0)
}

impl Session {
    /// Builds a session from a raw token, reading its expiry when the token is a JWT.
    pub fn new(token: impl AsRef<str>) -> ClientResult<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Err(ClientError::MissingToken);
        }
        Ok(Self {
            token: token.to_string(),
            expires_at: jwt_expiry(token),
        })
    }

    /// Builds a session with an explicitly known expiry.
    pub fn with_expiry(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Returns the token to send, or an error if the session cannot be used right now.
    pub fn authorize(&self) -> ClientResult<&str> {
        self.authorize_at(Utc::now())
    }

    pub fn authorize_at(&self, now: DateTime<Utc>) -> ClientResult<&str> {
        if self.token.is_empty() {
            return Err(ClientError::MissingToken);
        }
        match self.expires_at {
            Some(exp) if exp <= now => Err(ClientError::SessionExpired(exp)),
            _ => Ok(&self.token),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// File-backed storage for the access token.
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token; a missing or blank file means no token.
    pub fn load(&self) -> ClientResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::TokenRead(e)),
        }
    }

    pub fn save(&self, token: &str) -> ClientResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::InvalidInput("token cannot be empty".into()));
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ClientError::TokenWrite)?;
        }
        fs::write(&self.path, token).map_err(ClientError::TokenWrite)?;
        tracing::debug!("stored access token at {}", self.path.display());
        Ok(())
    }

    /// Removes the stored token. Returns whether a token was present.
    pub fn clear(&self) -> ClientResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ClientError::TokenWrite(e)),
        }
    }

    /// Loads the stored token as a session.
    pub fn session(&self) -> ClientResult<Session> {
        let token = self.load()?.ok_or(ClientError::MissingToken)?;
        Session::new(token)
    }
}
