use anyhow::bail;
use clap::{Arg, ArgMatches, Command};

use crate::gateway::{DEFAULT_GROUP, DEFAULT_PROVIDER_TIMEOUT_SECONDS};

pub const ARG_REGION: &str = "region";
pub const ARG_CLIENT_ID: &str = "client-id";
pub const ARG_USER_POOL_ID: &str = "user-pool-id";
pub const ARG_PROVIDER_TIMEOUT_SECONDS: &str = "provider-timeout-seconds";
pub const ARG_DEFAULT_GROUP: &str = "default-group";

pub const DEFAULT_REGION: &str = "ap-southeast-2";

#[derive(Debug, Clone)]
pub struct Options {
    pub region: String,
    pub client_id: String,
    pub user_pool_id: String,
    pub timeout_seconds: u64,
    pub default_group: String,
}

impl Options {
    /// Parse identity provider arguments from matches.
    ///
    /// # Errors
    /// Returns an error if a required value is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        // env vars set to "" still reach clap as values
        let required = |id: &str| match matches.get_one::<String>(id) {
            Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => bail!("missing required argument: --{id}"),
        };

        let timeout_seconds = matches
            .get_one::<u64>(ARG_PROVIDER_TIMEOUT_SECONDS)
            .copied()
            .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECONDS);
        if timeout_seconds == 0 {
            bail!("--{ARG_PROVIDER_TIMEOUT_SECONDS} must be greater than zero");
        }

        Ok(Self {
            region: required(ARG_REGION)?,
            client_id: required(ARG_CLIENT_ID)?,
            user_pool_id: required(ARG_USER_POOL_ID)?,
            timeout_seconds,
            default_group: required(ARG_DEFAULT_GROUP)?,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_REGION)
                .long(ARG_REGION)
                .help("AWS region of the Cognito user pool")
                .env("AUTHGATE_REGION")
                .default_value(DEFAULT_REGION),
        )
        .arg(
            Arg::new(ARG_CLIENT_ID)
                .long(ARG_CLIENT_ID)
                .help("Cognito app client id used for sign-up and login")
                .env("AUTHGATE_CLIENT_ID")
                .required(true),
        )
        .arg(
            Arg::new(ARG_USER_POOL_ID)
                .long(ARG_USER_POOL_ID)
                .help("Cognito user pool id used for group assignment")
                .env("AUTHGATE_USER_POOL_ID")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PROVIDER_TIMEOUT_SECONDS)
                .long(ARG_PROVIDER_TIMEOUT_SECONDS)
                .help("Upper bound in seconds for every identity provider call")
                .env("AUTHGATE_PROVIDER_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_DEFAULT_GROUP)
                .long(ARG_DEFAULT_GROUP)
                .help("Group every new account is placed in")
                .env("AUTHGATE_DEFAULT_GROUP")
                .default_value(DEFAULT_GROUP),
        )
}
