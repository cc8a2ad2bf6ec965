//! # Authgate (Authentication Gateway)
//!
//! `authgate` exposes sign-up, email confirmation and login over HTTP and
//! delegates all credential handling to a managed identity provider (an AWS
//! Cognito user pool). After a successful login it issues a short-lived,
//! locally signed session token.
//!
//! ## Statelessness
//!
//! Every request is independent. The gateway keeps no session table, no
//! credential cache and never retains the provider's access token; the only
//! shared data is immutable configuration and the provider client handle.
//!
//! ## Provider Calls
//!
//! All provider calls go through the [`identity::IdentityProvider`] trait and
//! are bounded by a configurable timeout. A rejected login is a valued
//! non-result (`Ok(None)`), reserved apart from transport and service faults,
//! so callers can tell "wrong password" from "provider unavailable".
//!
//! ## Group Assignment
//!
//! New identities are placed in a single default group after sign-up; a
//! failure there is logged and does not fail the registration. Elevated
//! groups are granted only through the explicit `assign-group` action.

pub mod api;
pub mod cli;
pub mod gateway;
pub mod identity;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
