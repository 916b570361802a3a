//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action to run, such as starting the API
//! server with its resolved store paths.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_FRONTEND_ORIGIN, ARG_PORT, storage};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let frontend_origin = matches.get_one::<String>(ARG_FRONTEND_ORIGIN).cloned();

    let storage_opts = storage::Options::parse(matches);

    if storage_opts.credentials_path == storage_opts.attempts_path {
        anyhow::bail!(
            "--{} and --{} must point to different files",
            storage::ARG_CREDENTIALS_FILE,
            storage::ARG_ATTEMPTS_FILE
        );
    }

    Ok(Action::Server(Args {
        port,
        credentials_path: storage_opts.credentials_path,
        attempts_path: storage_opts.attempts_path,
        frontend_origin,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builds_server_action() {
        temp_env::with_vars(
            [
                ("KEYHOLE_PORT", None::<&str>),
                ("KEYHOLE_DATA_DIR", Some("/tmp/keyhole")),
                ("KEYHOLE_CREDENTIALS_FILE", None),
                ("KEYHOLE_ATTEMPTS_FILE", None),
                ("KEYHOLE_FRONTEND_ORIGIN", None),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["keyhole"]);
                let result = handler(&matches);
                assert!(result.is_ok());
                if let Ok(Action::Server(args)) = result {
                    assert_eq!(
                        args,
                        Args {
                            port: 8080,
                            credentials_path: PathBuf::from("/tmp/keyhole/users.json"),
                            attempts_path: PathBuf::from("/tmp/keyhole/login_logs.json"),
                            frontend_origin: None,
                        }
                    );
                }
            },
        );
    }

    #[test]
    fn rejects_shared_document() {
        temp_env::with_vars(
            [
                ("KEYHOLE_CREDENTIALS_FILE", Some("/tmp/keyhole/store.json")),
                ("KEYHOLE_ATTEMPTS_FILE", Some("/tmp/keyhole/store.json")),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["keyhole"]);
                let result = handler(&matches);
                assert!(result.is_err());
                if let Err(err) = result {
                    assert!(err.to_string().contains("must point to different files"));
                }
            },
        );
    }
}
