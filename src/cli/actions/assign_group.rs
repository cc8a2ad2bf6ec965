use crate::cli::commands::provider;
use crate::gateway;
use crate::identity::{CognitoConfig, CognitoProvider};
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug)]
pub struct Args {
    pub provider: provider::Options,
    pub username: String,
    pub group: String,
}

/// Grant `group` to an existing user.
///
/// Unlike the grant made during sign-up, a failure here is an error.
/// # Errors
/// Returns an error if the provider rejects the grant, fails or times out.
pub async fn execute(args: Args) -> Result<()> {
    let timeout = Duration::from_secs(args.provider.timeout_seconds);
    let cognito = CognitoProvider::new(CognitoConfig {
        region: args.provider.region,
        client_id: args.provider.client_id,
        user_pool_id: args.provider.user_pool_id,
    })
    .await;

    gateway::assign_group(&cognito, timeout, &args.username, &args.group)
        .await
        .with_context(|| format!("Failed to add {} to group {}", args.username, args.group))?;

    println!("Added {} to group {}", args.username, args.group);
    Ok(())
}
