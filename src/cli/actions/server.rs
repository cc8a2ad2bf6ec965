use crate::{
    api,
    cli::commands::provider,
    gateway::{AuthGateway, GatewayConfig},
    identity::{CognitoConfig, CognitoProvider},
    session::SessionIssuer,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{sync::Arc, time::Duration};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub provider: provider::Options,
    pub session_secret: SecretString,
    pub session_ttl_seconds: u64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the session issuer cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let sessions = SessionIssuer::new(
        &args.session_secret,
        Duration::from_secs(args.session_ttl_seconds),
    )
    .context("Invalid session signing configuration")?;

    let config = GatewayConfig::new()
        .with_provider_timeout(Duration::from_secs(args.provider.timeout_seconds))
        .with_default_group(args.provider.default_group.clone());

    let cognito = CognitoProvider::new(CognitoConfig {
        region: args.provider.region,
        client_id: args.provider.client_id,
        user_pool_id: args.provider.user_pool_id,
    })
    .await;

    let gateway = AuthGateway::new(Arc::new(cognito), sessions, config);

    api::new(args.port, Arc::new(gateway)).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("region", args.provider.region.clone()),
        ("client_id", args.provider.client_id.clone()),
        ("user_pool_id", args.provider.user_pool_id.clone()),
        (
            "provider_timeout",
            format!("{}s", args.provider.timeout_seconds),
        ),
        ("default_group", args.provider.default_group.clone()),
        ("session_secret", "REDACTED".to_string()),
        ("session_ttl", format!("{}s", args.session_ttl_seconds)),
    ];
    info!("{}", startup_message(&entries));
}

fn startup_message(entries: &[(&str, String)]) -> String {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    message
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_message_aligns_keys() {
        let message = startup_message(&[
            ("listen", "tcp:8080".to_string()),
            ("session_secret", "REDACTED".to_string()),
        ]);
        assert!(message.contains("\n  listen:         tcp:8080"));
        assert!(message.contains("\n  session_secret: REDACTED"));
    }

    #[test]
    fn short_commit_truncates() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit("abc"), "abc");
    }
}
