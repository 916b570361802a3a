use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_DATA_DIR: &str = "data-dir";
pub const ARG_CREDENTIALS_FILE: &str = "credentials-file";
pub const ARG_ATTEMPTS_FILE: &str = "attempts-file";

pub const DEFAULT_CREDENTIALS_FILE: &str = "users.json";
pub const DEFAULT_ATTEMPTS_FILE: &str = "login_logs.json";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DATA_DIR)
                .long(ARG_DATA_DIR)
                .help("Directory holding the credential and attempt-log documents")
                .default_value("data")
                .env("KEYHOLE_DATA_DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_CREDENTIALS_FILE)
                .long(ARG_CREDENTIALS_FILE)
                .help("Credential store path (default: <data-dir>/users.json)")
                .env("KEYHOLE_CREDENTIALS_FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_ATTEMPTS_FILE)
                .long(ARG_ATTEMPTS_FILE)
                .help("Attempt log path (default: <data-dir>/login_logs.json)")
                .env("KEYHOLE_ATTEMPTS_FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub credentials_path: PathBuf,
    pub attempts_path: PathBuf,
}

impl Options {
    /// Resolve store paths, falling back to files under the data directory.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let data_dir = matches
            .get_one::<PathBuf>(ARG_DATA_DIR)
            .cloned()
            .unwrap_or_else(|| PathBuf::from("data"));

        let credentials_path = matches
            .get_one::<PathBuf>(ARG_CREDENTIALS_FILE)
            .cloned()
            .unwrap_or_else(|| data_dir.join(DEFAULT_CREDENTIALS_FILE));
        let attempts_path = matches
            .get_one::<PathBuf>(ARG_ATTEMPTS_FILE)
            .cloned()
            .unwrap_or_else(|| data_dir.join(DEFAULT_ATTEMPTS_FILE));

        Self {
            credentials_path,
            attempts_path,
        }
    }
}
