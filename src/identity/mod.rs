//! Identity provider abstraction.
//!
//! The gateway only sees this narrow interface. The Cognito adapter in
//! [`cognito`] is the production implementation; tests substitute a double.

pub mod cognito;
#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;
use std::time::{Duration, SystemTime};
use thiserror::Error;

pub use cognito::{CognitoConfig, CognitoProvider};

/// Provider-side error categories the gateway knows how to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionKind {
    UsernameExists,
    InvalidPassword,
    InvalidParameter,
    CodeDeliveryFailure,
    CodeMismatch,
    ExpiredCode,
    UserNotFound,
    UserNotConfirmed,
    PasswordResetRequired,
    NotAuthorized,
    /// Any other provider error code, kept verbatim for diagnostics.
    Other(String),
}

impl RejectionKind {
    /// Map a provider error code (e.g. `UsernameExistsException`) to a kind.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "UsernameExistsException" => Self::UsernameExists,
            "InvalidPasswordException" => Self::InvalidPassword,
            "InvalidParameterException" => Self::InvalidParameter,
            "CodeDeliveryFailureException" => Self::CodeDeliveryFailure,
            "CodeMismatchException" => Self::CodeMismatch,
            "ExpiredCodeException" => Self::ExpiredCode,
            "UserNotFoundException" => Self::UserNotFound,
            "UserNotConfirmedException" => Self::UserNotConfirmed,
            "PasswordResetRequiredException" => Self::PasswordResetRequired,
            "NotAuthorizedException" => Self::NotAuthorized,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The call completed but the provider refused it.
    #[error("{message}")]
    Rejected { kind: RejectionKind, message: String },
    /// The call could not complete (network, dispatch, malformed response).
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
    #[error("identity provider did not answer within {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    #[must_use]
    pub fn rejected(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self::Rejected {
            kind,
            message: message.into(),
        }
    }

    /// True when the remote call completed and the provider said no.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Result of a verified password authentication. Forwarded, never stored.
#[derive(Clone)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub issued_at: SystemTime,
    pub expires_in: Duration,
}

impl AuthenticationResult {
    #[must_use]
    pub fn expires_at(&self) -> SystemTime {
        self.issued_at + self.expires_in
    }
}

impl std::fmt::Debug for AuthenticationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationResult")
            .field("access_token", &"***")
            .field("issued_at", &self.issued_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an unconfirmed account with an `email` attribute.
    async fn sign_up(&self, username: &str, password: &str, email: &str)
    -> Result<(), ProviderError>;

    /// Verify a confirmation code for a pending registration.
    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), ProviderError>;

    /// Password authentication. `Ok(None)` means the credentials were rejected.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticationResult>, ProviderError>;

    async fn add_to_group(&self, username: &str, group: &str) -> Result<(), ProviderError>;
}
