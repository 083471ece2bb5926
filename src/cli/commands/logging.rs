use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_FORMAT: &str = "log-format";

/// Level names in verbosity order; the index is the `-v` count.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a `-v` count (0-5) or a level name, so `LINKR_LOG_LEVEL` can be
/// either.
fn parse_log_level(value: &str) -> Result<u8, String> {
    match value.parse::<u8>() {
        Ok(count) if count <= 5 => Ok(count),
        _ => LEVEL_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(value.trim()))
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level: {value}")),
    }
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

/// Adds the logging flags shared by every subcommand.
#[must_use]
pub fn with_args(command: Command) -> Command {
    let verbosity = Arg::new(ARG_VERBOSITY)
        .short('v')
        .long("verbose")
        .help("Increase log verbosity, or set LINKR_LOG_LEVEL=error|warn|info|debug|trace")
        .env("LINKR_LOG_LEVEL")
        .global(true)
        .action(ArgAction::Count)
        .value_parser(validator_log_level());

    let format = Arg::new(ARG_LOG_FORMAT)
        .long("log-format")
        .help("Log output format on stderr")
        .env("LINKR_LOG_FORMAT")
        .global(true)
        .default_value("text")
        .value_parser(["text", "json"]);

    command.arg(verbosity).arg(format)
}

#[cfg(test)]
mod tests {
    use super::parse_log_level;

    #[test]
    fn level_names_and_counts() {
        assert_eq!(parse_log_level("error"), Ok(0));
        assert_eq!(parse_log_level("DEBUG"), Ok(3));
        assert_eq!(parse_log_level("4"), Ok(4));
        assert!(parse_log_level("9").is_err());
        assert!(parse_log_level("loud").is_err());
    }
}
