//! Map validated CLI matches to an [`Action`].

use crate::cli::actions::{Action, assign_group, server};
use crate::cli::commands::{ARG_GROUP, ARG_USERNAME, CMD_ASSIGN_GROUP, provider, session};
use anyhow::{Context, Result};

/// Without a subcommand the server starts; `assign-group` runs the one-off grant.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let provider = provider::Options::parse(matches)?;

    if let Some(sub) = matches.subcommand_matches(CMD_ASSIGN_GROUP) {
        let username = sub
            .get_one::<String>(ARG_USERNAME)
            .cloned()
            .context("missing required argument: --username")?;
        let group = sub
            .get_one::<String>(ARG_GROUP)
            .cloned()
            .context("missing required argument: --group")?;

        return Ok(Action::AssignGroup(assign_group::Args {
            provider,
            username,
            group,
        }));
    }

    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let session = session::Options::parse(matches)?;

    Ok(Action::Server(server::Args {
        port,
        provider,
        session_secret: session.secret,
        session_ttl_seconds: session.ttl_seconds,
    }))
}
