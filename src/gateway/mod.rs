//! The auth gateway: registration, confirmation and login on top of an
//! [`IdentityProvider`], plus session issuance.

pub mod translate;

use std::{future::Future, sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::identity::{IdentityProvider, ProviderError};
use crate::session::{SessionError, SessionIssuer};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const DEFAULT_PROVIDER_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_GROUP: &str = "Users";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password should be at least 8 characters long")]
    PasswordTooShort,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    provider_timeout: Duration,
    default_group: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECONDS),
            default_group: DEFAULT_GROUP.to_string(),
        }
    }
}

impl GatewayConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_default_group(mut self, group: String) -> Self {
        self.default_group = group;
        self
    }
}

pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

/// Outcome of a login attempt that reached the provider.
#[derive(Debug, PartialEq, Eq)]
pub enum Login {
    /// Credentials verified; carries the signed session token.
    Granted(String),
    /// Provider returned no authentication result.
    Rejected,
}

pub struct AuthGateway {
    provider: Arc<dyn IdentityProvider>,
    sessions: SessionIssuer,
    config: GatewayConfig,
}

impl AuthGateway {
    #[must_use]
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        sessions: SessionIssuer,
        config: GatewayConfig,
    ) -> Self {
        Self {
            provider,
            sessions,
            config,
        }
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionIssuer {
        &self.sessions
    }

    /// Create the account, then place it in the default group.
    ///
    /// # Errors
    /// Local validation errors are returned before any provider call; provider
    /// failures of the sign-up itself are returned as [`GatewayError::Provider`].
    /// Group assignment failures are logged only.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration<'_>) -> Result<(), GatewayError> {
        validate_password(registration.password, registration.password_confirmation)?;

        with_timeout(
            "sign_up",
            self.config.provider_timeout,
            self.provider.sign_up(
                registration.username,
                registration.password,
                registration.email,
            ),
        )
        .await?;

        info!("sign-up accepted, confirmation pending");

        if let Err(err) = assign_group(
            self.provider.as_ref(),
            self.config.provider_timeout,
            registration.username,
            &self.config.default_group,
        )
        .await
        {
            error!(
                group = %self.config.default_group,
                "Error adding user to group: {err}"
            );
        }

        Ok(())
    }

    /// # Errors
    /// Any provider rejection or fault.
    #[instrument(skip(self, code))]
    pub async fn confirm(&self, username: &str, code: &str) -> Result<(), GatewayError> {
        with_timeout(
            "confirm_sign_up",
            self.config.provider_timeout,
            self.provider.confirm_sign_up(username, code),
        )
        .await?;

        info!("sign-up confirmed");
        Ok(())
    }

    /// # Errors
    /// Provider faults (anything other than "no authentication result") and
    /// session signing failures.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Login, GatewayError> {
        let result = with_timeout(
            "authenticate",
            self.config.provider_timeout,
            self.provider.authenticate(username, password),
        )
        .await?;

        let Some(result) = result else {
            debug!("credentials rejected");
            return Ok(Login::Rejected);
        };

        // The provider's access token is not retained.
        debug!(provider_expiry = ?result.expires_at(), "authentication verified");

        let token = self.sessions.issue(username)?;
        Ok(Login::Granted(token))
    }
}

/// Add `username` to `group`, bounded by `timeout`.
///
/// Shared by the sign-up side effect and the explicit `assign-group` action.
///
/// # Errors
/// Provider rejection, fault or timeout.
pub async fn assign_group(
    provider: &dyn IdentityProvider,
    timeout: Duration,
    username: &str,
    group: &str,
) -> Result<(), ProviderError> {
    with_timeout("add_to_group", timeout, provider.add_to_group(username, group)).await?;
    info!(username, group, "user added to group");
    Ok(())
}

fn validate_password(password: &str, confirmation: &str) -> Result<(), GatewayError> {
    if password != confirmation {
        return Err(GatewayError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(GatewayError::PasswordTooShort);
    }
    Ok(())
}

async fn with_timeout<T>(
    operation: &'static str,
    timeout: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    if let Ok(result) = tokio::time::timeout(timeout, call).await {
        result
    } else {
        warn!(operation, ?timeout, "identity provider call timed out");
        Err(ProviderError::Timeout(timeout))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::identity::RejectionKind;
    use crate::identity::stub::{LoginOutcome, StubProvider};
    use secrecy::SecretString;
    use std::sync::atomic::Ordering;

    const SECRET: &str = "gateway-test-secret";

    fn gateway(stub: &Arc<StubProvider>) -> AuthGateway {
        let sessions = SessionIssuer::new(
            &SecretString::from(SECRET.to_string()),
            Duration::from_secs(3600),
        )
        .unwrap();
        AuthGateway::new(
            stub.clone(),
            sessions,
            GatewayConfig::new().with_provider_timeout(Duration::from_millis(200)),
        )
    }

    fn registration<'a>(password: &'a str, confirmation: &'a str) -> Registration<'a> {
        Registration {
            username: "alice",
            email: "alice@example.com",
            password,
            password_confirmation: confirmation,
        }
    }

    #[tokio::test]
    async fn mismatched_passwords_never_reach_provider() {
        let stub = Arc::new(StubProvider::default());
        let result = gateway(&stub)
            .register(&registration("Secure123!", "Secure123?"))
            .await;
        assert!(matches!(result, Err(GatewayError::PasswordMismatch)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn short_password_never_reaches_provider() {
        let stub = Arc::new(StubProvider::default());
        let result = gateway(&stub).register(&registration("short", "short")).await;
        assert!(matches!(result, Err(GatewayError::PasswordTooShort)));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("Password should be at least 8 characters long".to_string())
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn registration_assigns_default_group() {
        let stub = Arc::new(StubProvider::default());
        gateway(&stub)
            .register(&registration("Secure123!", "Secure123!"))
            .await
            .unwrap();
        assert_eq!(stub.sign_up_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            stub.assigned_groups(),
            vec![("alice".to_string(), "Users".to_string())]
        );
    }

    #[tokio::test]
    async fn registration_uses_configured_group() {
        let stub = Arc::new(StubProvider::default());
        let sessions = SessionIssuer::new(
            &SecretString::from(SECRET.to_string()),
            Duration::from_secs(60),
        )
        .unwrap();
        let gateway = AuthGateway::new(
            stub.clone(),
            sessions,
            GatewayConfig::new().with_default_group("Members".to_string()),
        );
        gateway
            .register(&registration("Secure123!", "Secure123!"))
            .await
            .unwrap();
        assert_eq!(
            stub.assigned_groups(),
            vec![("alice".to_string(), "Members".to_string())]
        );
    }

    #[tokio::test]
    async fn admin_looking_registration_still_gets_default_group() {
        let stub = Arc::new(StubProvider::default());
        let request = Registration {
            username: "root",
            email: "root@admin.com",
            password: "Admin123!",
            password_confirmation: "Admin123!",
        };
        gateway(&stub).register(&request).await.unwrap();
        assert_eq!(
            stub.assigned_groups(),
            vec![("root".to_string(), "Users".to_string())]
        );
    }

    #[tokio::test]
    async fn group_failure_does_not_fail_registration() {
        let stub = Arc::new(StubProvider {
            group: Err(ProviderError::Unavailable("connection reset".to_string())),
            ..StubProvider::default()
        });
        let result = gateway(&stub)
            .register(&registration("Secure123!", "Secure123!"))
            .await;
        assert!(result.is_ok());
        assert_eq!(stub.group_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sign_up_rejection_skips_group_assignment() {
        let stub = Arc::new(StubProvider {
            sign_up: Err(ProviderError::rejected(
                RejectionKind::UsernameExists,
                "User already exists",
            )),
            ..StubProvider::default()
        });
        let result = gateway(&stub)
            .register(&registration("Secure123!", "Secure123!"))
            .await;
        assert!(matches!(result, Err(GatewayError::Provider(_))));
        assert_eq!(stub.group_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn login_without_result_is_rejected() {
        let stub = Arc::new(StubProvider {
            login: LoginOutcome::NoResult,
            ..StubProvider::default()
        });
        let login = gateway(&stub).authenticate("alice", "wrong").await.unwrap();
        assert_eq!(login, Login::Rejected);
    }

    #[tokio::test]
    async fn login_fault_is_an_error_not_a_rejection() {
        let stub = Arc::new(StubProvider {
            login: LoginOutcome::Fault(ProviderError::Unavailable("dns error".to_string())),
            ..StubProvider::default()
        });
        let result = gateway(&stub).authenticate("alice", "Secure123!").await;
        assert!(matches!(
            result,
            Err(GatewayError::Provider(ProviderError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn verified_login_issues_session_for_user() {
        let stub = Arc::new(StubProvider::default());
        let gateway = gateway(&stub);
        let Login::Granted(token) = gateway.authenticate("alice", "Secure123!").await.unwrap()
        else {
            panic!("expected a granted login");
        };
        let claims = gateway.sessions().verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(!token.contains("provider-access-token"));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let stub = Arc::new(StubProvider {
            delay: Some(Duration::from_secs(5)),
            ..StubProvider::default()
        });
        let result = gateway(&stub).confirm("alice", "123456").await;
        assert!(matches!(
            result,
            Err(GatewayError::Provider(ProviderError::Timeout(_)))
        ));
    }

    #[tokio::test]
    async fn explicit_group_assignment_propagates_failure() {
        let stub = StubProvider {
            group: Err(ProviderError::rejected(
                RejectionKind::Other("ResourceNotFoundException".to_string()),
                "Group not found.",
            )),
            ..StubProvider::default()
        };
        let result = assign_group(&stub, Duration::from_secs(1), "alice", "Admin").await;
        assert!(result.is_err());
        assert_eq!(
            stub.assigned_groups(),
            vec![("alice".to_string(), "Admin".to_string())]
        );
    }
}
