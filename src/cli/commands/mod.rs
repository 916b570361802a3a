pub mod logging;
pub mod storage;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PORT: &str = "port";
pub const ARG_FRONTEND_ORIGIN: &str = "frontend-origin";

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

    let command = Command::new("keyhole")
        .about("Username and password authentication service")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("KEYHOLE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_FRONTEND_ORIGIN)
                .long(ARG_FRONTEND_ORIGIN)
                .help("Front-end URL allowed by CORS (default: any origin)")
                .env("KEYHOLE_FRONTEND_ORIGIN"),
        );

    let command = storage::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VARS: [&str; 6] = [
        "KEYHOLE_PORT",
        "KEYHOLE_DATA_DIR",
        "KEYHOLE_CREDENTIALS_FILE",
        "KEYHOLE_ATTEMPTS_FILE",
        "KEYHOLE_FRONTEND_ORIGIN",
        "KEYHOLE_LOG_LEVEL",
    ];

    fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter().map(|var| (*var, None)).collect()
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "keyhole");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Username and password authentication service".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(cleared(), || {
            let matches = new().get_matches_from(vec!["keyhole"]);
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
            assert_eq!(matches.get_one::<String>(ARG_FRONTEND_ORIGIN), None);

            let options = storage::Options::parse(&matches);
            assert_eq!(options.credentials_path, PathBuf::from("data/users.json"));
            assert_eq!(options.attempts_path, PathBuf::from("data/login_logs.json"));
        });
    }

    #[test]
    fn test_check_args() {
        temp_env::with_vars(cleared(), || {
            let matches = new().get_matches_from(vec![
                "keyhole",
                "--port",
                "3001",
                "--data-dir",
                "/var/lib/keyhole",
                "--attempts-file",
                "/var/log/keyhole/attempts.json",
                "--frontend-origin",
                "http://localhost:3000",
            ]);

            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(3001));
            assert_eq!(
                matches.get_one::<String>(ARG_FRONTEND_ORIGIN).cloned(),
                Some("http://localhost:3000".to_string())
            );

            let options = storage::Options::parse(&matches);
            assert_eq!(
                options.credentials_path,
                PathBuf::from("/var/lib/keyhole/users.json")
            );
            assert_eq!(
                options.attempts_path,
                PathBuf::from("/var/log/keyhole/attempts.json")
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("KEYHOLE_PORT", Some("443")),
                ("KEYHOLE_DATA_DIR", Some("/srv/keyhole")),
                ("KEYHOLE_CREDENTIALS_FILE", Some("/srv/creds.json")),
                ("KEYHOLE_ATTEMPTS_FILE", None),
                ("KEYHOLE_FRONTEND_ORIGIN", Some("https://app.example.com")),
                ("KEYHOLE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["keyhole"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );

                let options = storage::Options::parse(&matches);
                assert_eq!(options.credentials_path, PathBuf::from("/srv/creds.json"));
                assert_eq!(
                    options.attempts_path,
                    PathBuf::from("/srv/keyhole/login_logs.json")
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("KEYHOLE_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["keyhole"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_u8 {
            temp_env::with_vars([("KEYHOLE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["keyhole".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(usize::from(index))));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index)
                );
            });
        }
    }

    #[test]
    fn test_invalid_log_level() {
        temp_env::with_vars([("KEYHOLE_LOG_LEVEL", Some("loud"))], || {
            let result = new().try_get_matches_from(vec!["keyhole"]);
            assert!(result.is_err());
        });
    }
}
