//! Locally signed session tokens (HS256 JWT).
//!
//! Tokens are issued after a verified login and never stored server-side.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session signing secret must not be empty")]
    EmptySecret,
    #[error("session token expired")]
    Expired,
    #[error("invalid session token signature")]
    InvalidSignature,
    #[error("malformed session token: {0}")]
    Malformed(String),
    #[error("failed to sign session token: {0}")]
    Signing(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionIssuer {
    /// # Errors
    /// Returns [`SessionError::EmptySecret`] if the secret is blank.
    pub fn new(secret: &SecretString, ttl: Duration) -> Result<Self, SessionError> {
        let secret = secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(SessionError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    /// Sign a fresh token for `username`, valid for the configured TTL.
    ///
    /// # Errors
    /// Returns [`SessionError::Signing`] if encoding fails.
    pub fn issue(&self, username: &str) -> Result<String, SessionError> {
        self.issue_at(username, SystemTime::now())
    }

    pub(crate) fn issue_at(&self, username: &str, now: SystemTime) -> Result<String, SessionError> {
        let iat = unix_seconds(now);
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = SessionClaims {
            sub: username.to_string(),
            username: username.to_string(),
            iat,
            exp: iat.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    /// Check signature and expiry, returning the claims.
    ///
    /// # Errors
    /// [`SessionError::Expired`], [`SessionError::InvalidSignature`] or
    /// [`SessionError::Malformed`].
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                ErrorKind::InvalidSignature => SessionError::InvalidSignature,
                _ => SessionError::Malformed(e.to_string()),
            })
    }
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("secret", &"***")
            .field("ttl", &self.ttl)
            .finish()
    }
}

fn unix_seconds(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> SessionIssuer {
        SessionIssuer::new(
            &SecretString::from(secret.to_string()),
            Duration::from_secs(DEFAULT_SESSION_TTL_SECONDS),
        )
        .unwrap()
    }

    #[test]
    fn token_round_trips_subject() {
        let issuer = issuer("correct-horse");
        let token = issuer.issue("alice").unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer("correct-horse");
        let two_hours_ago = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
        let token = issuer.issue_at("alice", two_hours_ago).unwrap();
        assert_eq!(issuer.verify(&token), Err(SessionError::Expired));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issuer("correct-horse").issue("alice").unwrap();
        assert_eq!(
            issuer("battery-staple").verify(&token),
            Err(SessionError::InvalidSignature)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            issuer("correct-horse").verify("not.a.jwt"),
            Err(SessionError::Malformed(_))
        ));
    }

    #[test]
    fn empty_secret_is_refused() {
        let result = SessionIssuer::new(&SecretString::from("  ".to_string()), Duration::ZERO);
        assert!(matches!(result, Err(SessionError::EmptySecret)));
    }

    #[test]
    fn debug_redacts_secret() {
        let debug = format!("{:?}", issuer("correct-horse"));
        assert!(!debug.contains("correct-horse"));
    }
}
