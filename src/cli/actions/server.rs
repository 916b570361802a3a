use crate::{
    api,
    auth::AuthService,
    store::{JsonAttemptLog, JsonCredentialStore},
};
use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub port: u16,
    pub credentials_path: PathBuf,
    pub attempts_path: PathBuf,
    pub frontend_origin: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the stores cannot be opened, the front-end origin is
/// invalid, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let frontend_origin = args
        .frontend_origin
        .as_deref()
        .map(api::frontend_origin)
        .transpose()?;

    let credentials = JsonCredentialStore::open(&args.credentials_path).with_context(|| {
        format!(
            "Failed to open credential store: {}",
            args.credentials_path.display()
        )
    })?;
    let attempts = JsonAttemptLog::open(&args.attempts_path).with_context(|| {
        format!(
            "Failed to open attempt log: {}",
            args.attempts_path.display()
        )
    })?;

    info!(
        credentials = %credentials.path().display(),
        attempts = %attempts.path().display(),
        "Stores ready"
    );

    let auth = AuthService::new(Arc::new(credentials), Arc::new(attempts));

    api::new(args.port, auth, frontend_origin).await
}
