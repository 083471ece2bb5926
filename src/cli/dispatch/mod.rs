//! Command-line argument dispatch.
//!
//! This module maps validated CLI matches to the action to run, resolving
//! connection settings and validating the alias up front.

use crate::cli::{
    actions::{resolve, Action},
    commands::{
        ARG_ALIAS, ARG_BASE_URL, ARG_REDIRECT_DELAY, ARG_SESSION_COOKIE, ARG_TIMEOUT, CMD_LOGOUT,
        CMD_RESOLVE, CMD_SESSION,
    },
    globals::GlobalArgs,
};
use crate::link::Alias;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::time::Duration;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the alias is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    match matches.subcommand() {
        Some((CMD_RESOLVE, sub)) => {
            let raw = sub
                .get_one::<String>(ARG_ALIAS)
                .context("missing required argument: <ALIAS>")?;
            let alias = Alias::parse(raw)?;
            Ok(Action::Resolve(resolve::Args { globals, alias }))
        }
        Some((CMD_SESSION, _)) => Ok(Action::Session(globals)),
        Some((CMD_LOGOUT, _)) => Ok(Action::Logout(globals)),
        Some((other, _)) => Err(anyhow!("unknown subcommand: {other}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let base_url = matches
        .get_one::<String>(ARG_BASE_URL)
        .cloned()
        .context("missing required argument: --base-url")?;

    let mut globals = GlobalArgs::new(base_url);
    if let Some(ms) = matches.get_one::<u64>(ARG_REDIRECT_DELAY) {
        globals.redirect_delay = Duration::from_millis(*ms);
    }
    if let Some(secs) = matches.get_one::<u64>(ARG_TIMEOUT) {
        globals.timeout = Duration::from_secs(*secs);
    }
    if let Some(cookie) = matches
        .get_one::<String>(ARG_SESSION_COOKIE)
        .filter(|value| !value.trim().is_empty())
    {
        globals.set_session_cookie(SecretString::from(cookie.trim().to_string()));
    }

    Ok(globals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    fn dispatch(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(
            [
                ("LINKR_BASE_URL", None::<&str>),
                ("LINKR_SESSION_COOKIE", None),
                ("LINKR_REDIRECT_DELAY_MS", None),
                ("LINKR_TIMEOUT", None),
            ],
            || handler(&commands::new().get_matches_from(args.iter().copied())),
        )
    }

    #[test]
    fn resolve_action_carries_alias_and_delay() {
        let action = dispatch(&[
            "linkr",
            "--base-url",
            "https://lnk.example",
            "--redirect-delay-ms",
            "200",
            "resolve",
            " abc ",
        ])
        .unwrap();

        match action {
            Action::Resolve(args) => {
                assert_eq!(args.alias.as_str(), "abc");
                assert_eq!(args.globals.redirect_delay, Duration::from_millis(200));
                assert_eq!(args.globals.timeout, Duration::from_secs(10));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn blank_alias_is_rejected() {
        let result = dispatch(&["linkr", "--base-url", "https://lnk.example", "resolve", "  "]);
        assert!(result.is_err());
    }

    #[test]
    fn session_commands_pick_up_cookie() {
        let action = dispatch(&[
            "linkr",
            "--base-url",
            "https://lnk.example",
            "logout",
            "--session-cookie",
            "session=abc",
        ])
        .unwrap();

        match action {
            Action::Logout(globals) => assert!(globals.session_cookie.is_some()),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
