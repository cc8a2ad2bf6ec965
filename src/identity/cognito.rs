//! AWS Cognito user pool adapter.

use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{AttributeType, AuthFlowType},
};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, instrument};

use super::{AuthenticationResult, IdentityProvider, ProviderError, RejectionKind};

const EMAIL_ATTRIBUTE: &str = "email";

#[derive(Clone, Debug)]
pub struct CognitoConfig {
    pub region: String,
    pub client_id: String,
    pub user_pool_id: String,
}

/// Cognito-backed [`IdentityProvider`].
///
/// The SDK client is cheap to clone and safe to share across requests.
#[derive(Clone, Debug)]
pub struct CognitoProvider {
    client: Client,
    config: CognitoConfig,
}

impl CognitoProvider {
    /// Build a provider using the standard AWS credential chain for `config.region`.
    pub async fn new(config: CognitoConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        info!(
            region = %config.region,
            user_pool_id = %config.user_pool_id,
            "Initialized Cognito identity provider"
        );

        Self::from_client(Client::new(&sdk_config), config)
    }

    #[must_use]
    pub fn from_client(client: Client, config: CognitoConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl IdentityProvider for CognitoProvider {
    #[instrument(skip(self, password, email))]
    async fn sign_up(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<(), ProviderError> {
        let attribute = AttributeType::builder()
            .name(EMAIL_ATTRIBUTE)
            .value(email)
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        self.client
            .sign_up()
            .client_id(&self.config.client_id)
            .username(username)
            .password(password)
            .user_attributes(attribute)
            .send()
            .await
            .map_err(classify)?;

        debug!("sign-up accepted by Cognito");
        Ok(())
    }

    #[instrument(skip(self, code))]
    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), ProviderError> {
        self.client
            .confirm_sign_up()
            .client_id(&self.config.client_id)
            .username(username)
            .confirmation_code(code)
            .send()
            .await
            .map_err(classify)?;

        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticationResult>, ProviderError> {
        let response = self
            .client
            .initiate_auth()
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .client_id(&self.config.client_id)
            .auth_parameters("USERNAME", username)
            .auth_parameters("PASSWORD", password)
            .send()
            .await;

        let output = match response {
            Ok(output) => output,
            Err(err) => return credentials_rejected(classify(err)),
        };

        // Challenges (MFA, NEW_PASSWORD_REQUIRED) come back without a result.
        let Some(result) = output.authentication_result() else {
            debug!(challenge = ?output.challenge_name(), "no authentication result");
            return Ok(None);
        };

        let access_token = result.access_token().ok_or_else(|| {
            ProviderError::Unavailable("authentication result without access token".to_string())
        })?;

        Ok(Some(AuthenticationResult {
            access_token: access_token.to_string(),
            issued_at: SystemTime::now(),
            expires_in: Duration::from_secs(u64::try_from(result.expires_in()).unwrap_or(0)),
        }))
    }

    #[instrument(skip(self))]
    async fn add_to_group(&self, username: &str, group: &str) -> Result<(), ProviderError> {
        self.client
            .admin_add_user_to_group()
            .user_pool_id(&self.config.user_pool_id)
            .username(username)
            .group_name(group)
            .send()
            .await
            .map_err(classify)?;

        Ok(())
    }
}

/// Split SDK errors into provider rejections and transport faults.
fn classify<E, R>(err: SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if let Some(service) = err.as_service_error() {
        let code = service.code().unwrap_or("Unknown");
        let message = service
            .message()
            .map_or_else(|| code.to_string(), str::to_string);
        return ProviderError::rejected(RejectionKind::from_code(code), message);
    }

    ProviderError::Unavailable(DisplayErrorContext(&err).to_string())
}

/// Cognito signals wrong credentials with exceptions; fold those into `Ok(None)`.
fn credentials_rejected(err: ProviderError) -> Result<Option<AuthenticationResult>, ProviderError> {
    match err {
        ProviderError::Rejected {
            kind:
                RejectionKind::NotAuthorized
                | RejectionKind::UserNotFound
                | RejectionKind::UserNotConfirmed
                | RejectionKind::PasswordResetRequired,
            message,
        } => {
            debug!("credentials rejected: {message}");
            Ok(None)
        }
        other => Err(other),
    }
}
