pub mod logging;
pub mod provider;
pub mod session;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_ASSIGN_GROUP: &str = "assign-group";
pub const ARG_USERNAME: &str = "username";
pub const ARG_GROUP: &str = "group";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("authgate")
        .about("Authentication gateway for a managed identity provider")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("AUTHGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .subcommand(assign_group());

    let command = provider::with_args(command);
    let command = session::with_args(command);
    logging::with_args(command)
}

// Explicit, operator-driven group grant.
fn assign_group() -> Command {
    Command::new(CMD_ASSIGN_GROUP)
        .about("Add an existing user to a group in the user pool")
        .arg(
            Arg::new(ARG_USERNAME)
                .long(ARG_USERNAME)
                .short('u')
                .help("Username to grant")
                .required(true),
        )
        .arg(
            Arg::new(ARG_GROUP)
                .long(ARG_GROUP)
                .short('g')
                .help("Group name, e.g. Admins")
                .required(true),
        )
}
