//! `-v` / `KEYHOLE_LOG_LEVEL`, stored as a count that `start` maps to a tracing level.

use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names indexed by verbosity count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn parse_log_level(value: &str) -> Result<u8, String> {
    let index = match value.parse::<usize>() {
        Ok(count) if count < LEVELS.len() => Some(count),
        Ok(_) => None,
        Err(_) => LEVELS
            .iter()
            .position(|level| level.eq_ignore_ascii_case(value)),
    };

    index
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("unknown log level '{value}', use one of: {}", LEVELS.join(", ")))
}

#[must_use]
pub fn log_level_parser() -> ValueParser {
    ValueParser::from(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log more: -v warn, -vv info, -vvv debug, -vvvv trace (default: error)")
            .env("KEYHOLE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(log_level_parser()),
    )
}
