pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_REDIRECT_DELAY: &str = "redirect-delay-ms";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_SESSION_COOKIE: &str = "session-cookie";
pub const ARG_ALIAS: &str = "alias";

pub const CMD_RESOLVE: &str = "resolve";
pub const CMD_SESSION: &str = "session";
pub const CMD_LOGOUT: &str = "logout";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("linkr")
        .about("Resolve Linkr short links")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_BASE_URL)
                .short('u')
                .long("base-url")
                .help("Base URL of the Linkr deployment, example: https://lnk.example")
                .env("LINKR_BASE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_REDIRECT_DELAY)
                .long("redirect-delay-ms")
                .help("Delay before navigating to the destination, in milliseconds")
                .env("LINKR_REDIRECT_DELAY_MS")
                .global(true)
                .default_value("1500")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("HTTP request timeout, in seconds")
                .env("LINKR_TIMEOUT")
                .global(true)
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE)
                .long("session-cookie")
                .help("Cookie header sent with session requests, example: session=...")
                .env("LINKR_SESSION_COOKIE")
                .hide_env_values(true)
                .global(true),
        )
        .subcommand(
            Command::new(CMD_RESOLVE)
                .about("Resolve an alias and print its destination URL")
                .arg(
                    Arg::new(ARG_ALIAS)
                        .help("Short link alias")
                        .required(true),
                ),
        )
        .subcommand(Command::new(CMD_SESSION).about("Show the logged-in user"))
        .subcommand(Command::new(CMD_LOGOUT).about("Invalidate the current session"));

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "linkr");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Resolve Linkr short links"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_resolve_args() {
        temp_env::with_vars(
            [
                ("LINKR_BASE_URL", None::<&str>),
                ("LINKR_REDIRECT_DELAY_MS", None),
                ("LINKR_TIMEOUT", None),
                ("LINKR_LOG_LEVEL", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "linkr",
                    "--base-url",
                    "https://lnk.example",
                    "resolve",
                    "abc",
                ]);

                assert_eq!(
                    matches.get_one::<String>(ARG_BASE_URL).map(String::as_str),
                    Some("https://lnk.example")
                );
                assert_eq!(matches.get_one::<u64>(ARG_REDIRECT_DELAY).copied(), Some(1500));
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(10));

                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, CMD_RESOLVE);
                assert_eq!(
                    sub.get_one::<String>(ARG_ALIAS).map(String::as_str),
                    Some("abc")
                );
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("LINKR_BASE_URL", Some("https://lnk.example")),
                ("LINKR_REDIRECT_DELAY_MS", Some("250")),
                ("LINKR_TIMEOUT", Some("3")),
                ("LINKR_SESSION_COOKIE", Some("session=abc")),
                ("LINKR_LOG_LEVEL", Some("info")),
                ("LINKR_LOG_FORMAT", Some("json")),
            ],
            || {
                let matches = new().get_matches_from(vec!["linkr", "session"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_BASE_URL).map(String::as_str),
                    Some("https://lnk.example")
                );
                assert_eq!(matches.get_one::<u64>(ARG_REDIRECT_DELAY).copied(), Some(250));
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(3));
                assert_eq!(
                    matches
                        .get_one::<String>(ARG_SESSION_COOKIE)
                        .map(String::as_str),
                    Some("session=abc")
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                assert_eq!(
                    matches
                        .get_one::<String>(logging::ARG_LOG_FORMAT)
                        .map(String::as_str),
                    Some("json")
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // One extra -v per level.
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("LINKR_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "linkr".to_string(),
                    "--base-url".to_string(),
                    "https://lnk.example".to_string(),
                    "logout".to_string(),
                ];

                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(u8::try_from(index).unwrap())
                );
            });
        }
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = new().try_get_matches_from(vec![
            "linkr",
            "--base-url",
            "https://lnk.example",
            "--timeout",
            "0",
            "session",
        ]);
        assert!(result.is_err());
    }
}
