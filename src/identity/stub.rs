//! Scripted [`IdentityProvider`] double for tests.

use async_trait::async_trait;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::{Duration, SystemTime};

use super::{AuthenticationResult, IdentityProvider, ProviderError};

#[derive(Debug, Clone)]
pub(crate) enum LoginOutcome {
    Verified,
    NoResult,
    Fault(ProviderError),
}

#[derive(Debug)]
pub(crate) struct StubProvider {
    pub sign_up: Result<(), ProviderError>,
    pub confirm: Result<(), ProviderError>,
    pub login: LoginOutcome,
    pub group: Result<(), ProviderError>,
    pub delay: Option<Duration>,
    pub sign_up_calls: AtomicUsize,
    pub confirm_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub group_calls: AtomicUsize,
    pub groups: Mutex<Vec<(String, String)>>,
}

impl Default for StubProvider {
    fn default() -> Self {
        Self {
            sign_up: Ok(()),
            confirm: Ok(()),
            login: LoginOutcome::Verified,
            group: Ok(()),
            delay: None,
            sign_up_calls: AtomicUsize::new(0),
            confirm_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            group_calls: AtomicUsize::new(0),
            groups: Mutex::new(Vec::new()),
        }
    }
}

impl StubProvider {
    pub(crate) fn calls(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
            + self.confirm_calls.load(Ordering::SeqCst)
            + self.login_calls.load(Ordering::SeqCst)
            + self.group_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn assigned_groups(&self) -> Vec<(String, String)> {
        self.groups.lock().map(|g| g.clone()).unwrap_or_default()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    async fn sign_up(
        &self,
        _username: &str,
        _password: &str,
        _email: &str,
    ) -> Result<(), ProviderError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.sign_up.clone()
    }

    async fn confirm_sign_up(&self, _username: &str, _code: &str) -> Result<(), ProviderError> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.confirm.clone()
    }

    async fn authenticate(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<Option<AuthenticationResult>, ProviderError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        match &self.login {
            LoginOutcome::Verified => Ok(Some(AuthenticationResult {
                access_token: "provider-access-token".to_string(),
                issued_at: SystemTime::now(),
                expires_in: Duration::from_secs(3600),
            })),
            LoginOutcome::NoResult => Ok(None),
            LoginOutcome::Fault(err) => Err(err.clone()),
        }
    }

    async fn add_to_group(&self, username: &str, group: &str) -> Result<(), ProviderError> {
        self.group_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut groups) = self.groups.lock() {
            groups.push((username.to_string(), group.to_string()));
        }
        self.group.clone()
    }
}
